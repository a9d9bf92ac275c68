//! # リポジトリ
//!
//! 通知処理が参照するデータの読み取りを抽象化する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ディスパッチャは `Arc<dyn Trait>` でリポジトリを受け取る
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **読み取り専用**: 通知サービスはアカウント/プロジェクトのデータを書き換えない

pub mod participant_repository;
pub mod user_project_repository;
pub mod user_repository;
pub mod user_setting_repository;

pub use participant_repository::{ParticipantRepository, PostgresParticipantRepository};
pub use user_project_repository::{PostgresUserProjectRepository, UserProjectRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
pub use user_setting_repository::{PostgresUserSettingRepository, UserSettingRepository};
