use thiserror::Error as ThisError;

/// 遗传算法引擎的错误类型
#[derive(Debug, ThisError)]
pub enum Error {
    /// 染色体描述缺失或不合法，或运行参数不合法
    #[error("配置错误：{0}")]
    Configuration(String),

    /// 随机初始化器或交叉函数返回了错误长度的 DNA 序列
    #[error("第 {slot} 条染色体的 DNA 长度应为 {expected}，实际为 {actual}")]
    SchemaMismatch {
        slot: usize,
        expected: usize,
        actual: usize,
    },

    /// 适应度函数返回的评价数目与种群容量不一致
    #[error("种群容量为 {expected}，但适应度函数返回了 {actual} 个评价")]
    EvaluationSizeMismatch { expected: usize, actual: usize },

    #[error("第 {index} 个个体的评价不是有限实数")]
    NonFiniteFitness { index: usize },

    #[error("种群为空")]
    EmptyPopulation,

    /// 在评价之前进行了选择或查询最佳个体
    #[error("种群尚未评价")]
    Unevaluated,

    /// 阈值筛选后没有幸存个体，无法补全种群
    #[error("没有评价高于阈值 {threshold} 的个体")]
    NoSurvivors { threshold: f64 },

    /// 交叉函数返回的错误，原样传递
    #[error("交叉函数执行失败：{0}")]
    Crossover(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("文件读写错误：{0}")]
    Io(#[from] std::io::Error),

    #[error("YAML 解析错误：{0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Configuration(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::Configuration(value.to_string())
    }
}
