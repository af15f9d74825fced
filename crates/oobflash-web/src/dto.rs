use serde::{Deserialize, Serialize};

use oobflash_core::Notification;

#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingNotificationsResponse {
    pub client_id: String,
    pub notifications: Vec<Notification>,
}
