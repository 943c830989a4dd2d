//! # 通知ディスパッチャー
//!
//! 従業員メール・クライアントメール・クライアント SMS の 3 チャネルを並行に実行し、
//! 各チャネルの結果を [`DispatchResult`] にまとめる。
//!
//! ## 設計方針
//!
//! - **チャネルの独立性**: 各チャネルは自分の結果だけを返し、最後に 1 か所で合成する。
//!   あるチャネルの失敗やスキップが他のチャネルを止めることはない
//! - **送信失敗はエラーにしない**: 送信元・通知先の参照失敗や送信基盤の失敗は
//!   ビジネスイベントとして記録し、そのチャネルのフラグを false のままにする
//! - **送信元アドレスは 1 回だけ取得**: 従業員メールとクライアントメールは
//!   同じ送信元アドレスを共有する
//! - **レンダリングは送信前**: 件名・本文は [`NotificationDispatcher::compose`] で
//!   送信開始前に確定させる。ここでの失敗は致命的エラーとして呼び出し側に返る

use std::sync::Arc;

use returnflow_domain::{
    contractor::{ClientContext, ResellerId},
    notification::{
        DispatchResult,
        EmailBatch,
        EmailMessage,
        NotificationError,
        NotificationEvent,
        NotificationType,
        SmsDispatchResult,
        SmsRequest,
    },
    template::TemplateData,
};
use returnflow_infra::{
    InfraError,
    notification::EmailSender,
    repository::RecipientRepository,
    sms::SmsSender,
};
use returnflow_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use tera::Context;

use crate::message_catalog::{Localizer, MessageKey};

/// 従業員メールの通知先を絞り込む権限タグ
pub const RETURN_PERMIT: &str = "tsGoodsReturn";

/// 送信前に確定させた件名と本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessages {
    pub employee_subject: String,
    pub employee_body:    String,
    pub client_subject:   String,
    pub client_body:      String,
}

/// 1 リクエスト分の送信に必要な情報
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    pub reseller_id:       ResellerId,
    pub client:            &'a ClientContext,
    pub notification_type: Option<NotificationType>,
    /// 変更後ステータス（差分がない場合は 0）
    pub differences_to:    i64,
    pub template_data:     &'a TemplateData,
}

/// 通知ディスパッチャー
pub struct NotificationDispatcher {
    recipients:   Arc<dyn RecipientRepository>,
    email_sender: Arc<dyn EmailSender>,
    sms_sender:   Arc<dyn SmsSender>,
    localizer:    Arc<dyn Localizer>,
}

impl NotificationDispatcher {
    pub fn new(
        recipients: Arc<dyn RecipientRepository>,
        email_sender: Arc<dyn EmailSender>,
        sms_sender: Arc<dyn SmsSender>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            recipients,
            email_sender,
            sms_sender,
            localizer,
        }
    }

    /// テンプレートデータから従業員宛・クライアント宛の件名と本文を組み立てる
    pub fn compose(
        &self,
        reseller_id: ResellerId,
        template_data: &TemplateData,
    ) -> Result<ComposedMessages, NotificationError> {
        let params = Context::from_serialize(template_data)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;
        let render = |key| self.localizer.localize(key, &params, reseller_id);

        Ok(ComposedMessages {
            employee_subject: render(MessageKey::EmployeeEmailSubject)?,
            employee_body:    render(MessageKey::EmployeeEmailBody)?,
            client_subject:   render(MessageKey::ClientEmailSubject)?,
            client_body:      render(MessageKey::ClientEmailBody)?,
        })
    }

    /// 3 チャネルを並行に実行し、結果をまとめる
    pub async fn dispatch(
        &self,
        ctx: &DispatchContext<'_>,
        messages: &ComposedMessages,
    ) -> DispatchResult {
        let from = self.from_address(ctx.reseller_id).await;
        let from = from.as_deref();

        let (employee_by_email, client_by_email, client_by_sms) = tokio::join!(
            self.notify_employees(ctx, from, messages),
            self.notify_client_by_email(ctx, from, messages),
            self.notify_client_by_sms(ctx),
        );

        DispatchResult::from_channels(employee_by_email, client_by_email, client_by_sms)
    }

    /// 従業員メール: 送信元と通知先がそろっていれば、通知先ごとに 1 通ずつ送る
    async fn notify_employees(
        &self,
        ctx: &DispatchContext<'_>,
        from: Option<&str>,
        messages: &ComposedMessages,
    ) -> bool {
        let channel = event::channel::EMPLOYEE_EMAIL;

        let Some(from) = from else {
            return false;
        };

        let recipients = match self
            .recipients
            .find_emails_by_permit(ctx.reseller_id, RETURN_PERMIT)
            .await
        {
            Ok(recipients) => recipients,
            Err(e) => {
                log_lookup_failure(ctx.reseller_id, channel, &e);
                return false;
            }
        };
        if recipients.is_empty() {
            log_skipped(ctx.reseller_id, channel, "通知先の従業員がいない");
            return false;
        }

        let emails = recipients
            .into_iter()
            .map(|to| EmailMessage {
                from: from.to_string(),
                to,
                subject: messages.employee_subject.clone(),
                body: messages.employee_body.clone(),
            })
            .collect();
        let batch =
            EmailBatch::for_employees(ctx.reseller_id, NotificationEvent::ChangeReturnStatus, emails);

        self.send_batch(&batch, channel).await
    }

    /// クライアントメール: ステータス変更で変更後ステータスがある場合のみ送る
    async fn notify_client_by_email(
        &self,
        ctx: &DispatchContext<'_>,
        from: Option<&str>,
        messages: &ComposedMessages,
    ) -> bool {
        let channel = event::channel::CLIENT_EMAIL;

        if ctx.notification_type != Some(NotificationType::Change) || ctx.differences_to == 0 {
            return false;
        }

        let Some(from) = from else {
            return false;
        };
        if ctx.client.email.is_empty() {
            log_skipped(ctx.reseller_id, channel, "クライアントのメールアドレスがない");
            return false;
        }

        let batch = EmailBatch::for_client(
            ctx.reseller_id,
            NotificationEvent::ChangeReturnStatus,
            EmailMessage {
                from: from.to_string(),
                to: ctx.client.email.clone(),
                subject: messages.client_subject.clone(),
                body: messages.client_body.clone(),
            },
            ctx.client.id,
            ctx.differences_to,
        );

        self.send_batch(&batch, channel).await
    }

    /// クライアント SMS: 携帯番号があれば通知種別を問わず送る
    async fn notify_client_by_sms(&self, ctx: &DispatchContext<'_>) -> SmsDispatchResult {
        let channel = event::channel::CLIENT_SMS;

        if ctx.client.mobile.is_empty() {
            return SmsDispatchResult::default();
        }

        let request = SmsRequest {
            reseller_id:   ctx.reseller_id,
            client_id:     ctx.client.id,
            event:         NotificationEvent::ChangeReturnStatus,
            to_status:     ctx.differences_to,
            template_data: ctx.template_data.clone(),
        };
        let outcome = self.sms_sender.send(&request).await;

        if outcome.sent {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.reseller_id = %ctx.reseller_id,
                event.result = event::result::SUCCESS,
                notification.channel = channel,
                notification.error = %outcome.error,
                "SMS 送信成功"
            );
        } else {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.reseller_id = %ctx.reseller_id,
                event.result = event::result::FAILURE,
                notification.channel = channel,
                notification.error = %outcome.error,
                "SMS 送信失敗"
            );
        }

        SmsDispatchResult::from(outcome)
    }

    /// 送信元アドレスを取得する（取得できない・空の場合は `None`）
    async fn from_address(&self, reseller_id: ResellerId) -> Option<String> {
        let channel = event::channel::EMAIL;
        match self.recipients.find_from_address(reseller_id).await {
            Ok(from) if from.is_empty() => {
                log_skipped(reseller_id, channel, "送信元アドレスが未設定");
                None
            }
            Ok(from) => Some(from),
            Err(e) => {
                log_lookup_failure(reseller_id, channel, &e);
                None
            }
        }
    }

    async fn send_batch(&self, batch: &EmailBatch, channel: &str) -> bool {
        match self.email_sender.send_batch(batch).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.reseller_id = %batch.reseller_id,
                    event.result = event::result::SUCCESS,
                    notification.channel = channel,
                    notification.count = batch.messages.len(),
                    "通知メール送信成功"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::EMAIL_TRANSPORT,
                    notification.channel = channel,
                    "通知メールの送信に失敗: {e}"
                );
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.reseller_id = %batch.reseller_id,
                    event.result = event::result::FAILURE,
                    notification.channel = channel,
                    error = %e,
                    "通知メール送信失敗"
                );
                false
            }
        }
    }
}

fn log_lookup_failure(reseller_id: ResellerId, channel: &str, err: &InfraError) {
    tracing::error!(
        error.category = log_error::category::INFRASTRUCTURE,
        error.kind = log_error::kind::RECIPIENT_LOOKUP,
        notification.channel = channel,
        "通知先の取得に失敗: {err}"
    );
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_FAILED,
        event.reseller_id = %reseller_id,
        event.result = event::result::FAILURE,
        notification.channel = channel,
        "通知先の取得に失敗したためスキップ"
    );
}

fn log_skipped(reseller_id: ResellerId, channel: &str, reason: &str) {
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_SKIPPED,
        event.reseller_id = %reseller_id,
        event.result = event::result::SKIPPED,
        notification.channel = channel,
        notification.reason = reason,
        "通知をスキップ"
    );
}
