//! # 返品通知サービス
//!
//! 検証 → 差分説明 → テンプレートデータ → 送信 の全体フローを統合する。

use returnflow_domain::{
    notification::DispatchResult,
    request::ReturnNotificationRequest,
};
use returnflow_shared::{event_log::event, log_business_event};
use serde_json::Value;

use super::{
    difference::DifferenceMessageBuilder,
    dispatcher::{DispatchContext, NotificationDispatcher},
    template_data::build_template_data,
    validator::{RequestValidator, ValidationOutcome},
};
use crate::error::ReturnNotificationError;

/// 返品通知サービス
///
/// 1 リクエストを処理して [`DispatchResult`] を返す。リクエストをまたいだ状態は持たない。
pub struct ReturnNotificationService {
    validator:   RequestValidator,
    differences: DifferenceMessageBuilder,
    dispatcher:  NotificationDispatcher,
}

impl ReturnNotificationService {
    pub fn new(
        validator: RequestValidator,
        differences: DifferenceMessageBuilder,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            validator,
            differences,
            dispatcher,
        }
    }

    /// 生のペイロードを解析して処理する
    pub async fn process_payload(
        &self,
        payload: &Value,
    ) -> Result<DispatchResult, ReturnNotificationError> {
        let request = ReturnNotificationRequest::from_payload(payload)?;
        self.process(&request).await
    }

    /// 返品通知を処理する
    ///
    /// エラーはすべて送信開始前に返る。送信開始後のチャネル単位の失敗は結果のフラグに反映される。
    #[tracing::instrument(
        name = "return_notification",
        skip_all,
        fields(reseller_id = %request.reseller_id, complaint_id = request.complaint_id)
    )]
    pub async fn process(
        &self,
        request: &ReturnNotificationRequest,
    ) -> Result<DispatchResult, ReturnNotificationError> {
        let parties = match self.validator.validate(request).await? {
            ValidationOutcome::Valid(parties) => parties,
            ValidationOutcome::SoftFailure(message) => {
                log_business_event!(
                    event.category = event::category::RETURN_NOTIFICATION,
                    event.action = event::action::REQUEST_REJECTED,
                    event.reseller_id = %request.reseller_id,
                    event.result = event::result::SKIPPED,
                    reason = message,
                    "返品通知リクエストを拒否"
                );
                return Ok(DispatchResult::rejected(message));
            }
        };

        let differences = self.differences.build(request, request.reseller_id)?;
        let template_data = build_template_data(request, &parties, differences);
        template_data.ensure_complete()?;

        let messages = self
            .dispatcher
            .compose(request.reseller_id, &template_data)?;

        let ctx = DispatchContext {
            reseller_id:       request.reseller_id,
            client:            &parties.client,
            notification_type: request.notification_type(),
            differences_to:    request.differences_to(),
            template_data:     &template_data,
        };
        Ok(self.dispatcher.dispatch(&ctx, &messages).await)
    }
}
