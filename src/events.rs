use marking_core::{Point, PointerEvent, PointerKind};
use std::str::FromStr;
use strum::EnumString;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Pointer(PointerEvent),
    ConfigReload,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' needs an x and a y coordinate")]
    MissingCoordinate(String),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("Unexpected trailing input '{0}'")]
    TrailingInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
enum Verb {
    #[strum(serialize = "press", serialize = "down")]
    Press,
    Move,
    #[strum(serialize = "release", serialize = "up")]
    Release,
    Cancel,
    Quit,
}

/// Parses one line of the pointer protocol.
///
/// `Ok(None)` means the line carries no event (blank or `#` comment). A
/// `cancel` is reported as a release at the same point, which ends the
/// session the way a lifted finger would.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let word = words.next().unwrap_or_default();
    let verb = Verb::from_str(word).map_err(|_| ParseError::UnknownCommand(word.to_string()))?;

    let event = match verb {
        Verb::Quit => AppEvent::Quit,
        Verb::Press | Verb::Move | Verb::Release | Verb::Cancel => {
            let mut coordinate = || {
                let raw = words
                    .next()
                    .ok_or_else(|| ParseError::MissingCoordinate(word.to_string()))?;
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ParseError::InvalidCoordinate(raw.to_string()))
            };
            let point = Point::new(coordinate()?, coordinate()?);
            let kind = match verb {
                Verb::Press => PointerKind::Press,
                Verb::Move => PointerKind::Move,
                _ => PointerKind::Release,
            };
            AppEvent::Pointer(PointerEvent::new(kind, point))
        }
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ParseError::TrailingInput(rest.join(" ")));
    }
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_lines() {
        let cases = vec![
            ("press 60 10", PointerEvent::press(60.0, 10.0)),
            ("DOWN 1.5 -2", PointerEvent::press(1.5, -2.0)),
            ("  move 60 130  ", PointerEvent::moved(60.0, 130.0)),
            ("release 0 0", PointerEvent::release(0.0, 0.0)),
            ("up 5 6", PointerEvent::release(5.0, 6.0)),
            ("cancel 7 8", PointerEvent::release(7.0, 8.0)),
        ];

        for (line, expected) in cases {
            assert_eq!(
                parse_line(line).unwrap(),
                Some(AppEvent::Pointer(expected)),
                "{line}"
            );
        }
    }

    #[test]
    fn test_parse_control_lines() {
        assert_eq!(parse_line("quit").unwrap(), Some(AppEvent::Quit));
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # a comment").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_line("hover 1 2").unwrap_err(),
            ParseError::UnknownCommand("hover".into())
        );
        assert_eq!(
            parse_line("move 1").unwrap_err(),
            ParseError::MissingCoordinate("move".into())
        );
        assert_eq!(
            parse_line("move 1 nan").unwrap_err(),
            ParseError::InvalidCoordinate("nan".into())
        );
        assert_eq!(
            parse_line("move x 2").unwrap_err(),
            ParseError::InvalidCoordinate("x".into())
        );
        assert_eq!(
            parse_line("press 1 2 3").unwrap_err(),
            ParseError::TrailingInput("3".into())
        );
        assert_eq!(
            parse_line("quit now").unwrap_err(),
            ParseError::TrailingInput("now".into())
        );
    }
}
