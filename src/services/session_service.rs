use chrono::{SubsecRound, Utc};

use crate::catalog::default_prizes;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    CollectionSummary, Language, NewPrize, PoolSummary, Prize, PrizeProbability, SpinResult,
    WonPrize,
};
use crate::services::PersistenceService;
use crate::services::draw_service::{
    collection_summary, compute_probabilities, draw_index, pool_summary,
};
use crate::storage::{StorageKeys, open_store};
use crate::utils::{RandomSource, generate_prize_id, generate_record_id};

/// 会话状态：奖池、中奖记录（最新在前）、金币余额、界面语言
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub prizes: Vec<Prize>,
    pub inventory: Vec<WonPrize>,
    pub balance: u64,
    pub language: Language,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            prizes: default_prizes(),
            inventory: Vec::new(),
            balance: 0,
            language: Language::default(),
        }
    }
}

impl SessionState {
    pub fn find_prize(&self, id: &str) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }
}

/// 状态变更通知
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PrizeWon(WonPrize),
    PrizesChanged,
    BalanceChanged(u64),
    LanguageChanged(Language),
    Reset,
}

pub type Listener = Box<dyn FnMut(&SessionEvent, &SessionState)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// 会话唯一的持有者。所有修改都经过这里，修改完成后整体写回存档并通知订阅者。
pub struct SessionService {
    state: SessionState,
    persistence: PersistenceService,
    rng: Box<dyn RandomSource>,
    spin_cost: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl SessionService {
    /// 从存档加载会话（含迁移），存档缺失或损坏的部分使用默认值
    pub fn load(
        persistence: PersistenceService,
        rng: Box<dyn RandomSource>,
        spin_cost: u64,
    ) -> Self {
        let state = persistence.load();
        Self {
            state,
            persistence,
            rng,
            spin_cost,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let store = open_store(&config.storage)?;
        let persistence =
            PersistenceService::new(store, StorageKeys::with_prefix(&config.storage.key_prefix));
        Ok(Self::load(
            persistence,
            Box::new(rand::thread_rng()),
            config.game.spin_cost,
        ))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn spin_cost(&self) -> u64 {
        self.spin_cost
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn probabilities(&self) -> Vec<PrizeProbability<'_>> {
        compute_probabilities(&self.state.prizes)
    }

    pub fn pool_summary(&self) -> PoolSummary {
        pool_summary(&self.state.prizes)
    }

    pub fn collection_summary(&self) -> CollectionSummary {
        collection_summary(&self.state.inventory)
    }

    /// 按配置的单价抽一次
    pub fn spin(&mut self) -> AppResult<SpinResult> {
        self.spend(self.spin_cost)
    }

    /// 抽奖 (Spin)
    ///
    /// 1. 余额不足 -> InsufficientFunds，不抽奖、不改任何状态
    /// 2. 抽奖引擎没有可抽奖品 -> EmptyMachine，不扣费、不改任何状态
    /// 3. 中奖奖品库存 -1，中奖记录插到最前，扣除金币
    pub fn spend(&mut self, cost: u64) -> AppResult<SpinResult> {
        let balance = self.state.balance;
        if balance < cost {
            log::warn!("Spin rejected: balance {balance} < cost {cost}");
            return Err(AppError::InsufficientFunds { balance, cost });
        }

        let Some(index) = draw_index(&self.state.prizes, self.rng.as_mut()) else {
            log::warn!("Spin rejected: machine is empty");
            return Err(AppError::EmptyMachine);
        };

        let prize = self.state.prizes[index].clone();
        // 存档只保存到毫秒
        let won_at = Utc::now().trunc_subsecs(3);
        let record = WonPrize::snapshot(generate_record_id(), &prize, won_at);

        self.state.prizes[index].take_one();
        self.state.inventory.insert(0, record.clone());
        self.state.balance = balance - cost;

        log::info!(
            "Spin won prize {} ({}), stock left {}, balance {}",
            prize.id,
            prize.tier.as_str(),
            self.state.prizes[index].stock,
            self.state.balance
        );

        self.commit(SessionEvent::PrizeWon(record.clone()));
        Ok(SpinResult {
            prize,
            record,
            balance: self.state.balance,
        })
    }

    /// 新增奖品：分配新 id，initial_stock = stock，追加到奖池末尾
    pub fn add_prize(&mut self, new: NewPrize) -> AppResult<Prize> {
        if new.name.trim().is_empty() {
            return Err(AppError::ValidationError("Prize name is required".into()));
        }
        if new.weight == 0 {
            return Err(AppError::ValidationError(
                "Prize weight must be positive".into(),
            ));
        }

        let prize = Prize::from_new(generate_prize_id(), new);
        log::info!("Added prize {} ({})", prize.id, prize.name);
        self.state.prizes.push(prize.clone());
        self.commit(SessionEvent::PrizesChanged);
        Ok(prize)
    }

    /// 调整库存：stock = max(0, stock + delta)，initial_stock 只升不降
    pub fn adjust_stock(&mut self, id: &str, delta: i64) -> AppResult<Prize> {
        let prize = self.find_prize_mut(id)?;
        prize.adjust_stock(delta);
        debug_assert!(prize.initial_stock >= prize.stock);
        let updated = prize.clone();

        self.commit(SessionEvent::PrizesChanged);
        Ok(updated)
    }

    /// 整条替换同 id 的奖品，不校验 initial_stock，由调用方负责
    pub fn update_prize(&mut self, updated: Prize) -> AppResult<()> {
        let prize = self.find_prize_mut(&updated.id)?;
        *prize = updated;
        self.commit(SessionEvent::PrizesChanged);
        Ok(())
    }

    /// 删除奖品，已有中奖记录是快照，不受影响
    pub fn delete_prize(&mut self, id: &str) -> AppResult<Prize> {
        let index = self
            .state
            .prizes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Prize {id}")))?;
        let removed = self.state.prizes.remove(index);
        log::info!("Deleted prize {} ({})", removed.id, removed.name);
        self.commit(SessionEvent::PrizesChanged);
        Ok(removed)
    }

    pub fn set_balance(&mut self, amount: u64) {
        self.state.balance = amount;
        self.commit(SessionEvent::BalanceChanged(amount));
    }

    /// 家长充值，返回充值后的余额
    pub fn add_balance(&mut self, amount: u64) -> AppResult<u64> {
        if amount == 0 {
            return Err(AppError::ValidationError(
                "Refill amount must be positive".into(),
            ));
        }
        let balance = self.state.balance.saturating_add(amount);
        log::info!("Added {amount} coins, balance {balance}");
        self.set_balance(balance);
        Ok(balance)
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;
        self.commit(SessionEvent::LanguageChanged(language));
    }

    /// 恢复出厂设置：删除存档槽位，状态整体回到默认值后只通知一次
    pub fn factory_reset(&mut self) {
        log::warn!("Factory reset requested");
        if let Err(e) = self.persistence.clear() {
            log::error!("Failed to clear persisted slots: {e}");
        }
        self.state = SessionState::default();
        self.commit(SessionEvent::Reset);
    }

    fn find_prize_mut(&mut self, id: &str) -> AppResult<&mut Prize> {
        self.state
            .prizes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Prize {id}")))
    }

    /// 写回存档并通知订阅者。写入失败只记日志：内存状态已生效，下次写入会整体覆盖。
    fn commit(&mut self, event: SessionEvent) {
        if let Err(e) = self.persistence.save(&self.state) {
            log::error!("Failed to persist session state: {e}");
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, &self.state);
        }
    }
}
