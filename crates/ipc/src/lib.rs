//! IPC message protocol for pixelpad
//!
//! Defines the messages exchanged between the browser host and the drawing
//! core: [`InputEvent`]s flow in, [`CoreToHost`] commands flow out. Both
//! sides speak JSON so external widgets can drive the canvas through the
//! same channel the DOM listeners use.

mod error;
mod input;
mod messages;

pub use error::IpcError;
pub use input::*;
pub use messages::*;

/// Decode a single JSON input event
pub fn decode_input(json: &str) -> Result<InputEvent, IpcError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a host command as JSON
pub fn encode_command(command: &CoreToHost) -> Result<String, IpcError> {
    Ok(serde_json::to_string(command)?)
}

/// Parse a recorded input script: one JSON event per line, blank lines skipped
pub fn parse_input_script(script: &str) -> Result<Vec<InputEvent>, IpcError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| IpcError::InvalidFormat {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_input() {
        let event = decode_input(r#"{"type":"KeyDown","data":{"key":"x"}}"#).unwrap();
        assert_eq!(event, InputEvent::KeyDown { key: "x".to_string() });
    }

    #[test]
    fn test_encode_command() {
        let json = encode_command(&CoreToHost::PickerChanged {
            slot: ColorSlot::Primary,
            color: "#ff0000".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"PickerChanged""#));
        assert!(json.contains(r##""color":"#ff0000""##));
    }

    #[test]
    fn test_parse_input_script() {
        let script = r#"
{"type":"PointerDown","data":{"button":"Left","x":105.0,"y":105.0}}

{"type":"PointerMove","data":{"x":155.0,"y":155.0}}
{"type":"PointerUp","data":{"button":"Left","x":155.0,"y":155.0}}
"#;
        let events = parse_input_script(script).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], InputEvent::PointerMove { x: 155.0, y: 155.0 });
    }

    #[test]
    fn test_parse_input_script_reports_line() {
        let script = "{\"type\":\"Wheel\",\"data\":{\"delta_y\":1.0}}\n{\"type\":\"Teleport\"}";
        match parse_input_script(script) {
            Err(IpcError::InvalidFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }
}
