pub use super::achievement::Entity as Achievement;
pub use super::course::Entity as Course;
pub use super::course_author::Entity as CourseAuthor;
pub use super::course_tag::Entity as CourseTag;
pub use super::module::Entity as Module;
pub use super::notification::Entity as Notification;
pub use super::question::Entity as Question;
pub use super::question_option::Entity as QuestionOption;
pub use super::section::Entity as Section;
pub use super::tag::Entity as Tag;
pub use super::unit::Entity as Unit;
pub use super::user::Entity as User;
pub use super::user_achievement::Entity as UserAchievement;
pub use super::user_course::Entity as UserCourse;
pub use super::user_module_progress::Entity as UserModuleProgress;
pub use super::user_preference::Entity as UserPreference;
pub use super::user_question_answer::Entity as UserQuestionAnswer;
pub use super::user_section_progress::Entity as UserSectionProgress;
