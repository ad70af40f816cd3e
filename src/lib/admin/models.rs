use std::{fmt, path::PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub mod course_model;
pub mod user_model;

pub use course_model::{Category, Course, Product};
pub use user_model::User;

/// Collections exposed by the hosted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Products,
}

impl Collection {
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A model for describing ARGS of the admin tool.
/// Consists of:
/// 1. Path to config.json, that contains the backend address and local storage location.
/// 2. The console action to perform.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show registered users and course counts
    Dashboard,
    /// List registered users
    Users,
    /// List courses
    Courses,
    /// Add a new course
    AddCourse(CourseFields),
    /// Edit an existing course, only given fields are changed
    EditCourse {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        changes: CourseFields,
    },
    /// Delete a course
    DeleteCourse {
        #[arg(long)]
        id: String,
    },
    /// Delete a registered user
    DeleteUser {
        #[arg(long)]
        id: String,
    },
    /// Set a new password for a user
    ResetPassword {
        #[arg(long)]
        id: String,
        #[arg(long)]
        password: String,
    },
    /// Replace every course with the default set
    ResetCourses,
    /// Forget the stored admin session
    Logout,
}

/// Course form inputs as typed on the command line.
/// Images are picked by their gallery id, like clicking a thumbnail.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct CourseFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, help = "Price without the K suffix")]
    pub price: Option<String>,
    #[arg(long)]
    pub rating: Option<String>,
    #[arg(long)]
    pub review_count: Option<String>,
    #[arg(long)]
    pub tutor_name: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long, value_name = "ID")]
    pub course_image: Option<u8>,
    #[arg(long, value_name = "ID")]
    pub tutor_image: Option<u8>,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Base URL of the hosted REST backend, e.g. `https://xxxx.mockapi.io/api/v1`
/// 2. Path to the JSON file that keeps the session and fallback snapshots
/// 3. Minimal length of a password set through the console
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub api_base_url: String,
    #[serde(default = "default_local_storage_path")]
    pub local_storage_path: PathBuf,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_local_storage_path() -> PathBuf {
    PathBuf::from("local_storage.json")
}

fn default_min_password_length() -> usize {
    6
}
