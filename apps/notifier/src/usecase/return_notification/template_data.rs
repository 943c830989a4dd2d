//! # テンプレートデータの組み立て

use returnflow_domain::{request::ReturnNotificationRequest, template::TemplateData};

use super::validator::ResolvedParties;

/// リクエストと解決済みの当事者からテンプレートデータを組み立てる
///
/// 完全性のチェックは行わない。呼び出し側で
/// [`TemplateData::ensure_complete`] を呼ぶこと。
pub fn build_template_data(
    request: &ReturnNotificationRequest,
    parties: &ResolvedParties,
    differences: String,
) -> TemplateData {
    TemplateData {
        complaint_id: request.complaint_id,
        complaint_number: request.complaint_number.clone(),
        creator_id: request.creator_id.as_i64(),
        creator_name: parties.creator.full_name.clone(),
        expert_id: request.expert_id.as_i64(),
        expert_name: parties.expert.full_name.clone(),
        client_id: request.client_id.as_i64(),
        client_name: parties.client_full_name.clone(),
        consumption_id: request.consumption_id,
        consumption_number: request.consumption_number.clone(),
        agreement_number: request.agreement_number.clone(),
        date: request.date.clone(),
        differences,
    }
}
