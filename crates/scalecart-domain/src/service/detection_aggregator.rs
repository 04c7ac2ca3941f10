//! Reduces one frame's detections to the item being registered

use std::collections::BTreeSet;

use scalecart_types::CaptureError;

use crate::model::Detection;

/// Distinct class labels in a frame; several boxes of one class count once
pub fn distinct_labels(detections: &[Detection]) -> BTreeSet<&str> {
    detections.iter().map(|d| d.label.as_str()).collect()
}

/// The single item class on the scale
///
/// A weight reading is only attributable to one class, so frames with zero or
/// several distinct classes are rejected.
pub fn single_item_label(detections: &[Detection]) -> Result<String, CaptureError> {
    let labels = distinct_labels(detections);
    let mut iter = labels.iter();
    match (iter.next(), iter.next()) {
        (None, _) => Err(CaptureError::NoObjectDetected),
        (Some(label), None) => Ok((*label).to_string()),
        (Some(_), Some(_)) => Err(CaptureError::Ambiguous {
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(labels: &[&str]) -> Vec<Detection> {
        labels.iter().map(|l| Detection::labelled(*l)).collect()
    }

    #[test]
    fn test_duplicate_boxes_are_one_item() {
        let detections = frame(&["apple", "apple", "apple"]);
        assert_eq!(distinct_labels(&detections).len(), 1);
        assert_eq!(single_item_label(&detections).unwrap(), "apple");
    }

    #[test]
    fn test_two_classes_are_ambiguous() {
        let detections = frame(&["banana", "apple", "banana"]);
        match single_item_label(&detections) {
            Err(CaptureError::Ambiguous { labels }) => {
                assert_eq!(labels, vec!["apple".to_string(), "banana".to_string()]);
            }
            other => panic!("expected ambiguous capture, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_frame() {
        assert!(matches!(
            single_item_label(&[]),
            Err(CaptureError::NoObjectDetected)
        ));
    }
}
