pub mod auth;
pub mod envelope;
pub mod json;
pub mod person;
pub mod task;
pub mod timestamp;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use envelope::{
    AUTHENTICATION_ERROR_MESSAGE, CONNECTION_ERROR_MESSAGE, Envelope, INVALID_RESPONSE_MESSAGE,
    NoContent,
};
pub use json::from_str_case_insensitive;
pub use person::{Address, CreatePerson, Person, UpdatePerson};
pub use task::{
    CreateTask, Task, TaskFilter, TaskPriority, TaskStatus, UpdateTask, UpdateTaskStatus,
};
pub use timestamp::Timestamp;
