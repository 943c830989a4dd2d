//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモックリポジトリと記録型の送信モック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! returnflow-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは `Clone` で状態を共有する。テストではクローンをユースケースに渡し、
//! 手元に残した側で呼び出し回数や送信内容を検証する。

use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{ClientContext, ContractorId, EmployeeContext, ResellerContext, ResellerId},
    notification::{EmailBatch, NotificationError, SmsOutcome, SmsRequest},
};

use crate::{
    error::InfraError,
    notification::EmailSender,
    repository::{ContractorRepository, RecipientRepository, ResellerRepository},
    sms::SmsSender,
};

// ===== MockResellerRepository =====

#[derive(Clone, Default)]
pub struct MockResellerRepository {
    resellers: Arc<Mutex<Vec<ResellerContext>>>,
    failing:   Arc<AtomicBool>,
    calls:     Arc<AtomicUsize>,
}

impl MockResellerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reseller(&self, reseller: ResellerContext) {
        self.resellers.lock().unwrap().push(reseller);
    }

    /// 以降の呼び出しをすべて DB エラーにする
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResellerRepository for MockResellerRepository {
    async fn find_by_id(&self, id: ResellerId) -> Result<Option<ResellerContext>, InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock: reseller lookup failed"));
        }
        Ok(self
            .resellers
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

// ===== MockContractorRepository =====

#[derive(Clone, Default)]
pub struct MockContractorRepository {
    clients:   Arc<Mutex<Vec<ClientContext>>>,
    employees: Arc<Mutex<Vec<EmployeeContext>>>,
    failing:   Arc<AtomicBool>,
}

impl MockContractorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client(&self, client: ClientContext) {
        self.clients.lock().unwrap().push(client);
    }

    pub fn add_employee(&self, employee: EmployeeContext) {
        self.employees.lock().unwrap().push(employee);
    }

    /// 以降の呼び出しをすべて DB エラーにする
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContractorRepository for MockContractorRepository {
    async fn find_client(&self, id: ContractorId) -> Result<Option<ClientContext>, InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock: client lookup failed"));
        }
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_employee(
        &self,
        id: ContractorId,
    ) -> Result<Option<EmployeeContext>, InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock: employee lookup failed"));
        }
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }
}

// ===== MockRecipientRepository =====

#[derive(Clone, Default)]
pub struct MockRecipientRepository {
    from_addresses: Arc<Mutex<HashMap<ResellerId, String>>>,
    permitted:      Arc<Mutex<Vec<(ResellerId, String, String)>>>,
    failing:        Arc<AtomicBool>,
    calls:          Arc<AtomicUsize>,
    from_calls:     Arc<AtomicUsize>,
}

impl MockRecipientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_from_address(&self, reseller_id: ResellerId, address: &str) {
        self.from_addresses
            .lock()
            .unwrap()
            .insert(reseller_id, address.to_string());
    }

    pub fn add_permitted_email(&self, reseller_id: ResellerId, permit: &str, email: &str) {
        self.permitted
            .lock()
            .unwrap()
            .push((reseller_id, permit.to_string(), email.to_string()));
    }

    /// 以降の呼び出しをすべて DB エラーにする
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `find_from_address` の呼び出し回数
    pub fn from_address_call_count(&self) -> usize {
        self.from_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipientRepository for MockRecipientRepository {
    async fn find_from_address(&self, reseller_id: ResellerId) -> Result<String, InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.from_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock: from address lookup failed"));
        }
        Ok(self
            .from_addresses
            .lock()
            .unwrap()
            .get(&reseller_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_emails_by_permit(
        &self,
        reseller_id: ResellerId,
        permit: &str,
    ) -> Result<Vec<String>, InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("mock: recipient lookup failed"));
        }
        Ok(self
            .permitted
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, p, _)| *r == reseller_id && p == permit)
            .map(|(_, _, email)| email.clone())
            .collect())
    }
}

// ===== MockEmailSender =====

/// 送信したバッチを記録するメール送信モック
#[derive(Clone, Default)]
pub struct MockEmailSender {
    batches: Arc<Mutex<Vec<EmailBatch>>>,
    failing: Arc<AtomicBool>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降の送信をすべて失敗させる（失敗したバッチは記録しない）
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn sent_batches(&self) -> Vec<EmailBatch> {
        self.batches.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_batch(&self, batch: &EmailBatch) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("mock: transport down".to_string()));
        }
        self.batches.lock().unwrap().push(batch.clone());
        Ok(())
    }
}

// ===== MockSmsSender =====

/// 送信リクエストを記録し、設定した結果を返す SMS 送信モック
#[derive(Clone)]
pub struct MockSmsSender {
    requests: Arc<Mutex<Vec<SmsRequest>>>,
    outcome:  Arc<Mutex<SmsOutcome>>,
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            outcome:  Arc::new(Mutex::new(SmsOutcome::sent())),
        }
    }
}

impl MockSmsSender {
    /// 常に送信成功を返すモックを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 返す結果を差し替える
    pub fn set_outcome(&self, outcome: SmsOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn requests(&self) -> Vec<SmsRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send(&self, request: &SmsRequest) -> SmsOutcome {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.lock().unwrap().clone()
    }
}
