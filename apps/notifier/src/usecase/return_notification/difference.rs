//! # 差分説明
//!
//! 通知種別と `differences` から、何が変わったかの説明文を組み立てる。
//!
//! | 通知種別 | `differences` | 説明文 |
//! |---------|---------------|--------|
//! | NEW | 不問 | `NewPositionAdded` |
//! | CHANGE | あり | `PositionStatusHasChanged`（FROM / TO にステータス表示名） |
//! | それ以外 | - | 空文字列 |

use std::sync::Arc;

use returnflow_domain::{
    contractor::ResellerId,
    notification::{NotificationError, NotificationType},
    request::ReturnNotificationRequest,
};
use tera::Context;

use crate::message_catalog::{Localizer, MessageKey, StatusNames};

/// 差分説明ビルダー
pub struct DifferenceMessageBuilder {
    localizer:    Arc<dyn Localizer>,
    status_names: Arc<dyn StatusNames>,
}

impl DifferenceMessageBuilder {
    pub fn new(localizer: Arc<dyn Localizer>, status_names: Arc<dyn StatusNames>) -> Self {
        Self {
            localizer,
            status_names,
        }
    }

    /// 差分説明を組み立てる
    pub fn build(
        &self,
        request: &ReturnNotificationRequest,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError> {
        match (request.notification_type(), request.differences) {
            (Some(NotificationType::New), _) => {
                self.localizer
                    .localize(MessageKey::NewPositionAdded, &Context::new(), reseller_id)
            }
            (Some(NotificationType::Change), Some(differences)) => {
                let mut params = Context::new();
                params.insert("FROM", &self.status_names.status_name(differences.from));
                params.insert("TO", &self.status_names.status_name(differences.to));
                self.localizer
                    .localize(MessageKey::PositionStatusHasChanged, &params, reseller_id)
            }
            _ => Ok(String::new()),
        }
    }
}
