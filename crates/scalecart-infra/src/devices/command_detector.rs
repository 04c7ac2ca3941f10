//! Camera + classifier driven through a helper process
//!
//! The helper keeps the camera open while it runs. Each `frame` request
//! returns one JSON line: a list of detections or `{"detections": [...]}`.

use scalecart_domain::device::FrameSource;
use scalecart_domain::model::Detection;
use scalecart_types::CameraError;
use serde::Deserialize;
use tracing::debug;

use super::line_process::LineProcess;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameReply {
    Bare(Vec<Detection>),
    Wrapped {
        detections: Vec<Detection>,
        #[serde(default)]
        error: Option<String>,
    },
}

pub struct CommandFrameSource {
    process: LineProcess,
}

impl CommandFrameSource {
    pub fn new(cmd_str: &str) -> Result<Self, CameraError> {
        let process = LineProcess::from_command_line(cmd_str).map_err(CameraError::Unavailable)?;
        Ok(Self { process })
    }
}

pub(crate) fn parse_frame_reply(reply: &str) -> Result<Vec<Detection>, CameraError> {
    let parsed: FrameReply = serde_json::from_str(reply.trim())
        .map_err(|e| CameraError::ReadFailed(format!("bad detector reply: {} - {}", e, reply)))?;
    match parsed {
        FrameReply::Bare(detections) => Ok(detections),
        FrameReply::Wrapped {
            error: Some(error), ..
        } => Err(CameraError::ReadFailed(error)),
        FrameReply::Wrapped { detections, .. } => Ok(detections),
    }
}

impl FrameSource for CommandFrameSource {
    fn acquire(&mut self) -> Result<(), CameraError> {
        self.process
            .start()
            .map_err(|e| CameraError::Unavailable(format!("{}: {}", self.process.program(), e)))
    }

    fn next_detections(&mut self) -> Result<Vec<Detection>, CameraError> {
        let reply = self
            .process
            .request("frame")
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;
        let detections = parse_frame_reply(&reply)?;
        debug!(count = detections.len(), "frame detections");
        Ok(detections)
    }

    fn release(&mut self) {
        self.process.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let detections =
            parse_frame_reply(r#"[{"label": "apple", "confidence": 0.91, "bbox": [1, 2, 30, 40]}, {"label": "apple"}]"#)
                .unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].confidence, Some(0.91));
        assert_eq!(detections[1].bbox, None);
    }

    #[test]
    fn test_parse_wrapped() {
        let detections = parse_frame_reply(r#"{"detections": [{"label": "milk"}]}"#).unwrap();
        assert_eq!(detections[0].label, "milk");
        assert!(parse_frame_reply("[]").unwrap().is_empty());
    }

    #[test]
    fn test_reported_error() {
        let err = parse_frame_reply(r#"{"detections": [], "error": "camera busy"}"#).unwrap_err();
        assert!(matches!(err, CameraError::ReadFailed(msg) if msg == "camera busy"));
        assert!(parse_frame_reply("garbage").is_err());
    }
}
