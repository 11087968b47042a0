use crate::transcript::message::TranscriptMessage;

/// External collaborator that renders a full transcript to PDF.
///
/// The surface only forwards the ordered message sequence; layout and
/// rendering live entirely with the implementor.
pub trait PdfExporter {
    fn export_transcript(&self, messages: &[TranscriptMessage]);
}
