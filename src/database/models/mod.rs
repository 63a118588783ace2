pub mod contact;
pub mod customer;
pub mod grant;
pub mod profile;
pub mod subject;
pub mod test_user;
pub mod user;

pub use contact::{Contact, ContactSummary, ContactWithOwner, NewContact};
pub use customer::{Customer, CustomerChanges, CustomerWithGrants, LinkRequest, NewCustomer};
pub use grant::{Grant, GrantWithProfile};
pub use profile::{NewProfile, Profile, ProfileSummary};
pub use subject::{NewSubject, Subject, SubjectSummary, SubjectWithUsers};
pub use test_user::{Test, TestUser, TestUserWithTest};
pub use user::{NewUser, User, UserChanges, UserRecord, UserSummary};
