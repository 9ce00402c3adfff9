//! Provider Chain - 有序兜底策略
//!
//! 每个策略要么给出结果（`Success`），要么放弃（`Skip`），链按顺序尝试直到成功。
//! 策略内部自己吞掉错误并记录日志，链本身不会失败。

use async_trait::async_trait;

/// 单次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    Success(T),
    Skip,
}

impl<T> Attempt<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Attempt::Success(v),
            None => Attempt::Skip,
        }
    }
}

/// 具名策略
#[async_trait]
pub trait Strategy<I, T>: Send + Sync
where
    I: Sync + ?Sized,
{
    /// 用于日志
    fn name(&self) -> &'static str;

    async fn attempt(&self, input: &I) -> Attempt<T>;
}

/// 链的输出，附带给出结果的策略名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub provider: &'static str,
}

/// 按顺序尝试的策略列表
pub struct ProviderChain<I: ?Sized, T> {
    label: &'static str,
    strategies: Vec<Box<dyn Strategy<I, T>>>,
}

impl<I, T> ProviderChain<I, T>
where
    I: Sync + ?Sized,
    T: Send,
{
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            strategies: Vec::new(),
        }
    }

    /// 追加一个策略（链尾）
    pub fn with(mut self, strategy: impl Strategy<I, T> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// 可选策略；`None` 时不加入
    pub fn with_optional<S>(self, strategy: Option<S>) -> Self
    where
        S: Strategy<I, T> + 'static,
    {
        match strategy {
            Some(s) => self.with(s),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 依次尝试，返回第一个成功的结果；全部放弃时返回 `None`
    pub async fn run(&self, input: &I) -> Option<Resolved<T>> {
        for strategy in &self.strategies {
            match strategy.attempt(input).await {
                Attempt::Success(value) => {
                    tracing::debug!(chain = self.label, provider = strategy.name(), "Provider succeeded");
                    return Some(Resolved {
                        value,
                        provider: strategy.name(),
                    });
                }
                Attempt::Skip => {
                    tracing::debug!(chain = self.label, provider = strategy.name(), "Provider skipped");
                }
            }
        }
        None
    }
}
