use crate::shared::detection::Detection;

/// Faces recognized in the current upload, pending attendance marking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognitionSession {
    detections: Vec<Detection>,
}

impl RecognitionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// Recognized names in detection order, without duplicates.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.detections.len());
        for d in &self.detections {
            if !names.contains(&d.name) {
                names.push(d.name.clone());
            }
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn replace(&mut self, detections: Vec<Detection>) {
        self.detections = detections;
    }

    pub fn clear(&mut self) {
        self.detections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(name: &str) -> Detection {
        Detection::new(name, 1.0, [0.0, 0.0, 10.0, 10.0])
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = RecognitionSession::new();
        assert!(session.is_empty());
        assert!(session.names().is_empty());
    }

    #[test]
    fn test_names_keep_order_and_drop_duplicates() {
        let mut session = RecognitionSession::new();
        session.replace(vec![det("Priya Singh"), det("Lohit Kumar"), det("Priya Singh")]);
        assert_eq!(session.names(), vec!["Priya Singh", "Lohit Kumar"]);
        assert_eq!(session.detections().len(), 3);
    }

    #[test]
    fn test_replace_discards_previous_upload() {
        let mut session = RecognitionSession::new();
        session.replace(vec![det("A"), det("B")]);
        session.replace(vec![det("C")]);
        assert_eq!(session.names(), vec!["C"]);
    }

    #[test]
    fn test_clear() {
        let mut session = RecognitionSession::new();
        session.replace(vec![det("A")]);
        session.clear();
        assert!(session.is_empty());
    }
}
