pub mod crm;
pub mod notification;

pub use crm::CrmClient;
pub use notification::{new_lead_message, NotificationClient};
