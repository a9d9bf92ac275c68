//! # テストユーティリティ
//!
//! ユニットテストと結合テストで共有するテストデータとセットアップ。

mod notification_test_builder;

pub use notification_test_builder::{
    NotificationTestBuilder,
    NotificationTestSetup,
    ProjectEventTestSetup,
    TEST_FROM_ADDRESS,
    TEST_SITE_DOMAIN,
};
