//! 返品通知ユースケースのテスト用フィクスチャ

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use returnflow_domain::{
    contractor::{
        ClientContext,
        ContractorId,
        ContractorType,
        EmployeeContext,
        ResellerContext,
        ResellerId,
    },
    request::ReturnNotificationRequest,
    template::TemplateData,
};
use returnflow_infra::mock::{
    MockContractorRepository,
    MockEmailSender,
    MockRecipientRepository,
    MockResellerRepository,
    MockSmsSender,
};
use serde_json::{Value, json};

use super::{
    DifferenceMessageBuilder,
    NotificationDispatcher,
    RETURN_PERMIT,
    RequestValidator,
    ResolvedParties,
    ReturnNotificationService,
};
use crate::{
    config::GuardMode,
    message_catalog::{Localizer, ReturnStatusNames, StatusNames, TeraLocalizer},
};

pub const RESELLER_ID: i64 = 5;
/// リセラーと作成者の解決に使われる ID
pub const CREATOR: i64 = 100;
pub const CREATOR_ID: i64 = 101;
pub const EXPERT_ID: i64 = 200;
pub const CLIENT_ID: i64 = 300;

/// 参照したステータスコードを記録する StatusNames
#[derive(Clone, Default)]
pub struct RecordingStatusNames {
    looked_up: Arc<Mutex<Vec<i64>>>,
}

impl RecordingStatusNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn looked_up(&self) -> Vec<i64> {
        self.looked_up.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.looked_up.lock().unwrap().len()
    }
}

impl StatusNames for RecordingStatusNames {
    fn status_name(&self, code: i64) -> String {
        self.looked_up.lock().unwrap().push(code);
        ReturnStatusNames.status_name(code)
    }
}

/// 英語カタログの Localizer
pub fn english_localizer() -> Arc<dyn Localizer> {
    Arc::new(TeraLocalizer::new("en", HashMap::new()).unwrap())
}

pub fn seeded_client() -> ClientContext {
    ClientContext {
        id:              ContractorId::new(CLIENT_ID),
        contractor_type: ContractorType::Customer,
        reseller_id:     Some(ResellerId::new(RESELLER_ID)),
        email:           "anna@example.com".to_string(),
        mobile:          "+79991234567".to_string(),
        name:            "Анна".to_string(),
        full_name:       "Анна Смирнова".to_string(),
    }
}

fn creator() -> EmployeeContext {
    EmployeeContext {
        id:        ContractorId::new(CREATOR),
        full_name: "Иван Петров".to_string(),
    }
}

fn expert() -> EmployeeContext {
    EmployeeContext {
        id:        ContractorId::new(EXPERT_ID),
        full_name: "Ольга Кузнецова".to_string(),
    }
}

fn reseller() -> ResellerContext {
    ResellerContext {
        id:   ResellerId::new(CREATOR),
        name: "Магазин на Невском".to_string(),
    }
}

pub fn resolved_parties() -> ResolvedParties {
    ResolvedParties {
        reseller:         reseller(),
        client:           seeded_client(),
        client_full_name: "Анна Смирнова".to_string(),
        creator:          creator(),
        expert:           expert(),
    }
}

/// すべての項目が埋まったテンプレートデータ
pub fn complete_template_data() -> TemplateData {
    TemplateData {
        complaint_id:       77,
        complaint_number:   "C-0077".to_string(),
        creator_id:         CREATOR_ID,
        creator_name:       "Иван Петров".to_string(),
        expert_id:          EXPERT_ID,
        expert_name:        "Ольга Кузнецова".to_string(),
        client_id:          CLIENT_ID,
        client_name:        "Анна Смирнова".to_string(),
        consumption_id:     12,
        consumption_number: "R-0012".to_string(),
        agreement_number:   "A-2024/15".to_string(),
        date:               "2024-03-15".to_string(),
        differences:        "Position status changed: \"Pending\" → \"Rejected\"".to_string(),
    }
}

/// `{"data": {...}}` 形式の有効なペイロード（数値の一部は文字列で届く）
pub fn valid_payload(notification_type: i64) -> Value {
    json!({
        "data": {
            "resellerId": RESELLER_ID.to_string(),
            "notificationType": notification_type,
            "creator": CREATOR,
            "creatorId": CREATOR_ID.to_string(),
            "expertId": EXPERT_ID,
            "clientId": CLIENT_ID.to_string(),
            "complaintId": 77,
            "complaintNumber": "C-0077",
            "consumptionId": "12",
            "consumptionNumber": "R-0012",
            "agreementNumber": "A-2024/15",
            "date": "2024-03-15",
            "differences": { "from": 1, "to": "2" },
        }
    })
}

pub fn valid_request(notification_type: i64) -> ReturnNotificationRequest {
    ReturnNotificationRequest::from_payload(&valid_payload(notification_type)).unwrap()
}

/// 変更通知の有効なペイロードに `overrides` のキーを上書きしたリクエスト
pub fn request_with(overrides: Value) -> ReturnNotificationRequest {
    let mut payload = valid_payload(2);
    if let (Some(data), Some(overrides)) = (payload["data"].as_object_mut(), overrides.as_object())
    {
        for (key, value) in overrides {
            data.insert(key.clone(), value.clone());
        }
    }
    ReturnNotificationRequest::from_payload(&payload).unwrap()
}

/// モック一式
pub struct TestWorld {
    pub resellers:    MockResellerRepository,
    pub contractors:  MockContractorRepository,
    pub recipients:   MockRecipientRepository,
    pub email_sender: MockEmailSender,
    pub sms_sender:   MockSmsSender,
    pub status_names: RecordingStatusNames,
}

impl TestWorld {
    /// 有効なペイロードがそのまま通るデータを投入済みのモック一式
    pub fn seeded() -> Self {
        let resellers = MockResellerRepository::new();
        resellers.add_reseller(reseller());

        let contractors = MockContractorRepository::new();
        contractors.add_client(seeded_client());
        contractors.add_employee(creator());
        contractors.add_employee(expert());

        let recipients = MockRecipientRepository::new();
        let reseller_id = ResellerId::new(RESELLER_ID);
        recipients.set_from_address(reseller_id, "shop@example.com");
        recipients.add_permitted_email(reseller_id, RETURN_PERMIT, "a.manager@example.com");
        recipients.add_permitted_email(reseller_id, RETURN_PERMIT, "b.manager@example.com");

        Self {
            resellers,
            contractors,
            recipients,
            email_sender: MockEmailSender::new(),
            sms_sender: MockSmsSender::new(),
            status_names: RecordingStatusNames::new(),
        }
    }

    /// モックを注入したサービス（英語カタログ）
    pub fn service(&self, guard_mode: GuardMode) -> ReturnNotificationService {
        let localizer = english_localizer();

        ReturnNotificationService::new(
            RequestValidator::new(
                Arc::new(self.resellers.clone()),
                Arc::new(self.contractors.clone()),
                guard_mode,
            ),
            DifferenceMessageBuilder::new(localizer.clone(), Arc::new(self.status_names.clone())),
            NotificationDispatcher::new(
                Arc::new(self.recipients.clone()),
                Arc::new(self.email_sender.clone()),
                Arc::new(self.sms_sender.clone()),
                localizer,
            ),
        )
    }
}
