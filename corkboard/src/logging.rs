//! Logging helpers

use serde::Serialize;
use std::fmt::{self, Debug, Display};

/// Render a value as YAML in log lines.
///
/// ```
/// use corkboard::Pretty;
/// use corkboard::types::CardSize;
/// use tracing::debug;
///
/// debug!("Card: {}", Pretty(&CardSize::default()));
/// ```
///
/// The output starts with a newline. Falls back to `{:#?}` if the value
/// cannot be written as YAML.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> Pretty<T> {
    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{yaml}"),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> Display for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

impl<T: Serialize + Debug> Debug for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn test_pretty_is_yaml() {
        let rendered = Pretty(&Point::new(10.0, 25.0)).to_string();
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("x: 10.0"));
        assert!(rendered.contains("y: 25.0"));
    }
}
