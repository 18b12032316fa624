pub mod application;

pub use application::{
    Application, ApplicationPayload, ApplicationRow, ApplicationStatus, ApplicationUpdate,
    JobType, NewApplication, WorkLocation,
};
