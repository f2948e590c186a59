//! Translation of egui file hover/drop input into controller events.

use eframe::egui::DroppedFile;
use scope_core::UploadCandidate;

/// Build a candidate from a dropped file; native drops carry a path, web drops bytes.
pub fn candidate_from_drop(file: &DroppedFile) -> Option<UploadCandidate> {
    if let Some(path) = &file.path {
        let mut candidate = UploadCandidate::from_path(path);
        if !file.mime.is_empty() {
            candidate.declared_type = file.mime.clone();
        }
        return Some(candidate);
    }
    file.bytes.as_ref().map(|bytes| {
        UploadCandidate::from_bytes(bytes.clone(), file.mime.clone(), file.name.clone())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    DragOver,
    DragLeave,
}

/// Edge detector for files hovering over the window.
#[derive(Debug, Default)]
pub struct HoverTracker {
    hovering: bool,
}

impl HoverTracker {
    /// A drop ends the hover without a leave event; the drop handler clears the highlight.
    pub fn update(&mut self, files_hovering: bool, dropped: bool) -> Option<HoverEvent> {
        if dropped {
            self.hovering = false;
            return None;
        }
        match (self.hovering, files_hovering) {
            (false, true) => {
                self.hovering = true;
                Some(HoverEvent::DragOver)
            }
            (true, false) => {
                self.hovering = false;
                Some(HoverEvent::DragLeave)
            }
            _ => None,
        }
    }
}
