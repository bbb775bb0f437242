mod api;
mod config;
mod error;

mod data_objects;

pub use api::FcmApi;
pub use config::FcmConfig;
pub use data_objects::{
    AndroidConfig,
    AndroidNotification,
    ApnsConfig,
    ApnsPayload,
    Aps,
    MulticastMessage,
    MulticastResponse,
    Notification,
    SendError,
    SendOutcome,
};
pub use error::FcmApiError;
