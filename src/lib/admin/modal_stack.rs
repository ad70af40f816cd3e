use log::debug;
use thiserror::Error;

use super::image_picker::GalleryKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    User { id: String, name: String },
    Course { id: String, title: String },
}

impl DeleteTarget {
    pub fn id(&self) -> &str {
        match self {
            DeleteTarget::User { id, .. } | DeleteTarget::Course { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DeleteTarget::User { .. } => "user",
            DeleteTarget::Course { .. } => "course",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    DeleteConfirm(DeleteTarget),
    AddCourse,
    EditCourse { course_id: String },
    Gallery(GalleryKind),
}

impl Overlay {
    pub fn is_course_form(&self) -> bool {
        matches!(self, Overlay::AddCourse | Overlay::EditCourse { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("cannot open {requested:?} while {open:?} is shown")]
    Obscured { requested: Overlay, open: Overlay },
    #[error("the {0} gallery opens only over a course form")]
    GalleryWithoutForm(GalleryKind),
    #[error("no course form is open")]
    NoCourseForm,
    #[error("no image gallery is open")]
    NoGallery,
    #[error("nothing is awaiting delete confirmation")]
    NoDeleteTarget,
}

/// Overlays currently shown, bottom first. Delete confirmation and course
/// forms sit on the page itself; galleries only ever sit on a course form.
#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    overlays: Vec<Overlay>,
}

impl ModalStack {
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn top(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    fn open_on_page(&mut self, overlay: Overlay) -> Result<(), ModalError> {
        if let Some(open) = self.top() {
            return Err(ModalError::Obscured {
                requested: overlay,
                open: open.clone(),
            });
        }
        debug!("Opening {:?}", overlay);
        self.overlays.push(overlay);
        Ok(())
    }

    pub fn open_delete_confirm(&mut self, target: DeleteTarget) -> Result<(), ModalError> {
        self.open_on_page(Overlay::DeleteConfirm(target))
    }

    pub fn open_add_course(&mut self) -> Result<(), ModalError> {
        self.open_on_page(Overlay::AddCourse)
    }

    pub fn open_edit_course(&mut self, course_id: impl Into<String>) -> Result<(), ModalError> {
        self.open_on_page(Overlay::EditCourse {
            course_id: course_id.into(),
        })
    }

    pub fn open_gallery(&mut self, kind: GalleryKind) -> Result<(), ModalError> {
        match self.top() {
            Some(overlay) if overlay.is_course_form() => {
                debug!("Opening {} gallery", kind);
                self.overlays.push(Overlay::Gallery(kind));
                Ok(())
            }
            _ => Err(ModalError::GalleryWithoutForm(kind)),
        }
    }

    pub fn delete_target(&self) -> Option<&DeleteTarget> {
        self.overlays.iter().find_map(|overlay| match overlay {
            Overlay::DeleteConfirm(target) => Some(target),
            _ => None,
        })
    }

    pub fn course_form(&self) -> Option<&Overlay> {
        self.overlays.iter().find(|overlay| overlay.is_course_form())
    }

    pub fn active_gallery(&self) -> Option<GalleryKind> {
        match self.top() {
            Some(Overlay::Gallery(kind)) => Some(*kind),
            _ => None,
        }
    }

    pub fn close_gallery(&mut self) -> Result<GalleryKind, ModalError> {
        let kind = self.active_gallery().ok_or(ModalError::NoGallery)?;
        self.overlays.pop();
        Ok(kind)
    }

    /// Closes the course form together with any gallery opened over it.
    pub fn close_course_form(&mut self) -> Result<Overlay, ModalError> {
        let position = self
            .overlays
            .iter()
            .position(Overlay::is_course_form)
            .ok_or(ModalError::NoCourseForm)?;
        let form = self.overlays.remove(position);
        self.overlays.truncate(position);
        debug!("Closed {:?}", form);
        Ok(form)
    }

    pub fn close_delete_confirm(&mut self) -> Result<DeleteTarget, ModalError> {
        let position = self
            .overlays
            .iter()
            .position(|overlay| matches!(overlay, Overlay::DeleteConfirm(_)))
            .ok_or(ModalError::NoDeleteTarget)?;
        match self.overlays.remove(position) {
            Overlay::DeleteConfirm(target) => {
                self.overlays.truncate(position);
                Ok(target)
            }
            _ => Err(ModalError::NoDeleteTarget),
        }
    }

    /// Backdrop click: closes whatever is on top.
    pub fn dismiss_top(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }
}
