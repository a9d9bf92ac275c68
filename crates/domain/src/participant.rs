//! # 取り組みの参加者
//!
//! レビュアーや共同作業者など、取り組みの更新を購読しているユーザー。
//! 1 つの取り組みに複数の参加者が存在する。

use crate::{project::UserProjectId, user::User};

/// 参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    user_project_id: UserProjectId,
    user:            User,
    subscribed:      bool,
}

impl Participant {
    pub fn new(user_project_id: UserProjectId, user: User, subscribed: bool) -> Self {
        Self {
            user_project_id,
            user,
            subscribed,
        }
    }

    pub fn user_project_id(&self) -> &UserProjectId {
        &self.user_project_id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// 通知を購読しているか
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}
