//! Root controller of the admin screen.
use log::{error, info, warn};
use thiserror::Error;

use super::{
    backend::{Backend, BackendError},
    course_form::{CourseField, CourseForm, ValidationErrors},
    helpers::{default_courses, log_all_courses, log_all_users},
    image_picker::GalleryKind,
    loading::LoadingFlag,
    local_storage::{LocalStorage, StorageError},
    modal_stack::{DeleteTarget, ModalError, ModalStack, Overlay},
    models::{Collection, Course, Product, User},
    notifier::Notifier,
    resource_store::ResourceStore,
    session::Session,
};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("course form has invalid fields: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Modal(#[from] ModalError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("no password reset in progress")]
    NoPasswordReset,
    #[error("unknown user {0}")]
    UnknownUser(String),
    #[error("unknown course {0}")]
    UnknownCourse(String),
    #[error("no image {id} in the {gallery} gallery")]
    UnknownImage { gallery: GalleryKind, id: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: usize,
    pub courses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub user_id: String,
    pub new_password: String,
}

pub struct AdminConsole<B, N> {
    backend: B,
    notifier: N,
    storage: LocalStorage,
    session: Session,
    users: ResourceStore<User>,
    courses: ResourceStore<Course>,
    form: CourseForm,
    modals: ModalStack,
    password_reset: Option<PasswordReset>,
    min_password_length: usize,
    loading: LoadingFlag,
    form_loading: LoadingFlag,
}

impl<B: Backend, N: Notifier> AdminConsole<B, N> {
    pub fn new(
        backend: B,
        notifier: N,
        storage: LocalStorage,
        session: Session,
        min_password_length: usize,
    ) -> Self {
        if !session.is_admin() {
            warn!("Admin console opened without an admin session");
        }
        AdminConsole {
            backend,
            notifier,
            storage,
            session,
            users: ResourceStore::new(),
            courses: ResourceStore::new(),
            form: CourseForm::default(),
            modals: ModalStack::default(),
            password_reset: None,
            min_password_length,
            loading: LoadingFlag::default(),
            form_loading: LoadingFlag::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn users(&self) -> &[User] {
        self.users.items()
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.items()
    }

    pub fn user_store(&self) -> &ResourceStore<User> {
        &self.users
    }

    pub fn course_store(&self) -> &ResourceStore<Course> {
        &self.courses
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    pub fn password_reset(&self) -> Option<&PasswordReset> {
        self.password_reset.as_ref()
    }

    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn form_loading(&self) -> LoadingFlag {
        self.form_loading.clone()
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats {
            users: self.users.len(),
            courses: self.courses.len(),
        }
    }

    pub async fn load(&mut self) {
        let _busy = self.loading.raise();
        let (users, courses) = futures::join!(
            self.users.list(&self.backend, &self.storage),
            self.courses.list(&self.backend, &self.storage),
        );
        log_all_users(users);
        log_all_courses(courses);
    }

    /* Deletion */

    pub fn request_delete_user(&mut self, id: &str) -> Result<(), ConsoleError> {
        let user = self
            .users
            .find(id)
            .ok_or_else(|| ConsoleError::UnknownUser(id.to_owned()))?;
        let target = DeleteTarget::User {
            id: user.id.clone(),
            name: user.name.clone(),
        };
        Ok(self.modals.open_delete_confirm(target)?)
    }

    pub fn request_delete_course(&mut self, id: &str) -> Result<(), ConsoleError> {
        let course = self
            .courses
            .find(id)
            .ok_or_else(|| ConsoleError::UnknownCourse(id.to_owned()))?;
        let target = DeleteTarget::Course {
            id: course.id.clone(),
            title: course.title.clone(),
        };
        Ok(self.modals.open_delete_confirm(target)?)
    }

    pub fn cancel_delete(&mut self) -> Result<(), ConsoleError> {
        self.modals.close_delete_confirm()?;
        Ok(())
    }

    /// On failure the confirmation stays open so the user can retry.
    pub async fn confirm_delete(&mut self) -> Result<(), ConsoleError> {
        let target = self
            .modals
            .delete_target()
            .cloned()
            .ok_or(ModalError::NoDeleteTarget)?;
        let _busy = self.loading.raise();
        let result = match &target {
            DeleteTarget::User { id, .. } => {
                self.users.delete(&self.backend, &self.storage, id).await
            }
            DeleteTarget::Course { id, .. } => {
                self.courses.delete(&self.backend, &self.storage, id).await
            }
        };
        match result {
            Ok(()) => {
                self.modals.close_delete_confirm()?;
                info!("Deleted {} {}", target.kind(), target.id());
                self.notifier.acknowledge(match &target {
                    DeleteTarget::User { .. } => "User deleted successfully!",
                    DeleteTarget::Course { .. } => "Course deleted successfully!",
                });
                Ok(())
            }
            Err(err) => {
                error!("Error deleting {} {}: {}", target.kind(), target.id(), err);
                self.notifier
                    .alert("Something went wrong while deleting. Please try again.");
                Err(err.into())
            }
        }
    }

    /* Course form */

    pub fn open_add_course(&mut self) -> Result<(), ConsoleError> {
        self.modals.open_add_course()?;
        self.form.reset();
        Ok(())
    }

    pub fn open_edit_course(&mut self, id: &str) -> Result<(), ConsoleError> {
        let course = self
            .courses
            .find(id)
            .ok_or_else(|| ConsoleError::UnknownCourse(id.to_owned()))?;
        self.modals.open_edit_course(course.id.clone())?;
        self.form.seed(course);
        Ok(())
    }

    pub fn edit_field(&mut self, field: CourseField, value: &str) -> Result<(), ConsoleError> {
        if self.modals.course_form().is_none() {
            return Err(ModalError::NoCourseForm.into());
        }
        self.form.edit(field, value);
        Ok(())
    }

    pub fn open_gallery(&mut self, kind: GalleryKind) -> Result<(), ConsoleError> {
        Ok(self.modals.open_gallery(kind)?)
    }

    pub fn close_gallery(&mut self) -> Result<(), ConsoleError> {
        self.modals.close_gallery()?;
        Ok(())
    }

    /// Writes the chosen image into the draft and closes the gallery, the
    /// course form stays open underneath.
    pub fn select_image(&mut self, id: u8) -> Result<(), ConsoleError> {
        let gallery = self.modals.active_gallery().ok_or(ModalError::NoGallery)?;
        let asset = gallery
            .find(id)
            .ok_or(ConsoleError::UnknownImage { gallery, id })?;
        self.form.select_image(gallery, asset.path);
        self.modals.close_gallery()?;
        Ok(())
    }

    /// Unsaved input is dropped without asking.
    pub fn close_course_form(&mut self) -> Result<(), ConsoleError> {
        self.modals.close_course_form()?;
        self.form.reset();
        Ok(())
    }

    pub fn dismiss_top(&mut self) -> Option<Overlay> {
        let overlay = self.modals.dismiss_top()?;
        if overlay.is_course_form() {
            self.form.reset();
        }
        Some(overlay)
    }

    /// Validates the draft and, only if every field passes, creates or
    /// updates the course depending on which form is open.
    pub async fn submit_course(&mut self) -> Result<(), ConsoleError> {
        let editing = match self.modals.course_form() {
            Some(Overlay::AddCourse) => None,
            Some(Overlay::EditCourse { course_id }) => Some(course_id.clone()),
            _ => return Err(ModalError::NoCourseForm.into()),
        };
        let product = match self.form.submit() {
            Ok(product) => product,
            Err(errors) => return Err(ConsoleError::Validation(errors.clone())),
        };

        let _busy = self.form_loading.raise();
        let result = match &editing {
            None => {
                self.courses
                    .create(&self.backend, &self.storage, &product)
                    .await
            }
            Some(id) => {
                self.courses
                    .update(&self.backend, &self.storage, id, &product)
                    .await
            }
        };
        match result {
            Ok(()) => {
                self.modals.close_course_form()?;
                self.form.reset();
                info!("Saved course {}", product.title);
                self.notifier.acknowledge(match editing {
                    None => "Course added successfully!",
                    Some(_) => "Course updated successfully!",
                });
                Ok(())
            }
            Err(err) => {
                error!("Error saving course {}: {}", product.title, err);
                self.notifier.alert(match editing {
                    None => "Something went wrong while adding the course.",
                    Some(_) => "Something went wrong while updating the course.",
                });
                Err(err.into())
            }
        }
    }

    /* Password reset */

    pub fn start_password_reset(&mut self, user_id: &str) -> Result<(), ConsoleError> {
        if self.users.find(user_id).is_none() {
            return Err(ConsoleError::UnknownUser(user_id.to_owned()));
        }
        self.password_reset = Some(PasswordReset {
            user_id: user_id.to_owned(),
            new_password: String::new(),
        });
        Ok(())
    }

    pub fn set_new_password(&mut self, password: &str) -> Result<(), ConsoleError> {
        let reset = self
            .password_reset
            .as_mut()
            .ok_or(ConsoleError::NoPasswordReset)?;
        reset.new_password = password.to_owned();
        Ok(())
    }

    pub fn cancel_password_reset(&mut self) {
        self.password_reset = None;
    }

    /// Sends the whole user record with the new password.
    pub async fn submit_password_reset(&mut self) -> Result<(), ConsoleError> {
        let reset = self
            .password_reset
            .clone()
            .ok_or(ConsoleError::NoPasswordReset)?;
        if reset.new_password.chars().count() < self.min_password_length {
            self.notifier.alert(&format!(
                "Password must be at least {} characters",
                self.min_password_length
            ));
            return Err(ConsoleError::PasswordTooShort {
                min: self.min_password_length,
            });
        }
        let mut user = self
            .users
            .find(&reset.user_id)
            .cloned()
            .ok_or_else(|| ConsoleError::UnknownUser(reset.user_id.clone()))?;
        user.password = Some(reset.new_password);

        let _busy = self.loading.raise();
        match self
            .users
            .update(&self.backend, &self.storage, &reset.user_id, &user)
            .await
        {
            Ok(()) => {
                self.password_reset = None;
                info!("Password reset for {}", user.email);
                self.notifier.acknowledge("Password reset successfully!");
                Ok(())
            }
            Err(err) => {
                error!("Error resetting password of {}: {}", user.email, err);
                self.notifier
                    .alert("Something went wrong while resetting the password.");
                Err(err.into())
            }
        }
    }

    /* Maintenance */

    /// Deletes every course and recreates the default set. There is no
    /// rollback: a failure leaves the collection as far as the loop got.
    pub async fn reset_courses(&mut self) -> Result<(), ConsoleError> {
        let _busy = self.loading.raise();
        let result = self.replace_courses_with_defaults().await;
        self.courses.list(&self.backend, &self.storage).await;
        match result {
            Ok(()) => {
                self.notifier.acknowledge("Courses reset to defaults!");
                Ok(())
            }
            Err(err) => {
                error!("Error resetting courses: {}", err);
                self.notifier
                    .alert("Something went wrong while resetting the courses.");
                Err(err.into())
            }
        }
    }

    async fn replace_courses_with_defaults(&self) -> Result<(), BackendError> {
        let existing: Vec<Product> = self.backend.get_all(Collection::Products).await?;
        info!("Removing {} existing courses", existing.len());
        for product in existing.iter() {
            match &product.id {
                Some(id) => self.backend.delete(Collection::Products, id).await?,
                None => warn!("Course {} has no id, leaving it", product.title),
            }
        }
        for product in default_courses() {
            self.backend.create(Collection::Products, &product).await?;
        }
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ConsoleError> {
        self.session.logout(&self.storage)?;
        Ok(())
    }
}
