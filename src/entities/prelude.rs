pub use super::client_profiles::Entity as ClientProfiles;
pub use super::content_records::Entity as ContentRecords;
pub use super::users::Entity as Users;
