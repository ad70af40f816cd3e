use log::{info, warn};

use super::{
    backend::Backend,
    console::{AdminConsole, ConsoleError},
    course_form::CourseField,
    image_picker::GalleryKind,
    local_storage::LocalStorage,
    models::{Args, Command, Config, CourseFields},
    notifier::Notifier,
    session::Session,
};

/// Types the given inputs into the open course form, picking images through
/// their galleries.
pub fn fill_course_form<B: Backend, N: Notifier>(
    console: &mut AdminConsole<B, N>,
    fields: &CourseFields,
) -> Result<(), ConsoleError> {
    let text_inputs = [
        (CourseField::Title, &fields.title),
        (CourseField::Description, &fields.description),
        (CourseField::Category, &fields.category),
        (CourseField::Price, &fields.price),
        (CourseField::Rating, &fields.rating),
        (CourseField::ReviewCount, &fields.review_count),
        (CourseField::TutorName, &fields.tutor_name),
        (CourseField::Position, &fields.position),
        (CourseField::Company, &fields.company),
    ];
    for (field, value) in text_inputs {
        if let Some(value) = value {
            console.edit_field(field, value)?;
        }
    }

    for (gallery, image_id) in [
        (GalleryKind::CourseImage, fields.course_image),
        (GalleryKind::TutorImage, fields.tutor_image),
    ] {
        if let Some(image_id) = image_id {
            console.open_gallery(gallery)?;
            console.select_image(image_id)?;
        }
    }
    Ok(())
}

async fn submit_filled_form<B: Backend, N: Notifier>(
    console: &mut AdminConsole<B, N>,
    fields: &CourseFields,
) -> Result<(), ConsoleError> {
    fill_course_form(console, fields)?;
    let result = console.submit_course().await;
    if let Err(ConsoleError::Validation(errors)) = &result {
        for (field, message) in errors.iter() {
            warn!("{}: {}", field, message);
        }
    }
    result
}

pub async fn run<B: Backend, N: Notifier>(
    backend: B,
    notifier: N,
    args: &Args,
    config: &Config,
) -> Result<(), ConsoleError> {
    let storage = LocalStorage::new(&config.local_storage_path);
    let session = Session::restore(&storage)?;
    let mut console = AdminConsole::new(
        backend,
        notifier,
        storage,
        session,
        config.min_password_length,
    );
    console.load().await;

    match &args.command {
        Command::Dashboard => {
            let stats = console.dashboard();
            if let Some(user) = console.session().user() {
                info!("Signed in as {}", user.name);
            }
            info!("Registered users: {}", stats.users);
            info!("Courses: {}", stats.courses);
        }
        Command::Users => {
            info!("Registered users ({})", console.users().len());
            for user in console.users() {
                info!(
                    "[{}] {} <{}> {} {}{}",
                    user.id,
                    user.name,
                    user.email,
                    user.gender,
                    user.phone,
                    user.role
                        .as_ref()
                        .map(|role| format!(", {}", role))
                        .unwrap_or_default()
                );
            }
        }
        Command::Courses => {
            info!("Courses ({})", console.courses().len());
            for course in console.courses() {
                info!(
                    "[{}] {} ({}) Rp {}, {} at {} ({}), rated {} ({})",
                    course.id,
                    course.title,
                    course.category,
                    course.price,
                    course.tutor_name,
                    course.company,
                    course.position,
                    course.rating,
                    course.review_count
                );
            }
        }
        Command::AddCourse(fields) => {
            console.open_add_course()?;
            submit_filled_form(&mut console, fields).await?;
        }
        Command::EditCourse { id, changes } => {
            console.open_edit_course(id)?;
            submit_filled_form(&mut console, changes).await?;
        }
        Command::DeleteCourse { id } => {
            console.request_delete_course(id)?;
            console.confirm_delete().await?;
        }
        Command::DeleteUser { id } => {
            console.request_delete_user(id)?;
            console.confirm_delete().await?;
        }
        Command::ResetPassword { id, password } => {
            console.start_password_reset(id)?;
            console.set_new_password(password)?;
            console.submit_password_reset().await?;
        }
        Command::ResetCourses => {
            console.reset_courses().await?;
        }
        Command::Logout => {
            console.logout()?;
        }
    }
    Ok(())
}
