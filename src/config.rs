//! 遗传算法运行参数的定义
//!

use crate::operators::MutationRate;
use crate::Error;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fs::read_to_string;
use std::path::Path;

/// 变异参数：概率和倍率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationConfig {
    pub numerator: u32,
    pub denominator: u32,
    pub magnitude: u8,
}

impl MutationConfig {
    pub fn rate(&self) -> Result<MutationRate, Error> {
        MutationRate::new(self.numerator, self.denominator)
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// 初始种群数量
    pub population: usize,
    /// 迭代的代数
    pub generations: usize,
    /// 每代选择后的幸存数
    pub reserve: usize,
    /// 选择阈值，评价不高于阈值的个体会被淘汰
    pub threshold: Option<f64>,
    /// 每代交叉产生的子代数
    pub offspring: usize,
    pub mutation: MutationConfig,
    /// 随机数种子，不提供时使用系统熵源
    pub seed: Option<u64>,
    /// 每隔多少代报告一次进度，默认为 100
    pub update_interval: Option<usize>,
    /// 运行进度超过这一比例后，找到的更好的个体才会被保存，默认为 0.9
    pub report_after: Option<f64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population: 100,
            generations: 1000,
            reserve: 20,
            threshold: None,
            offspring: 100,
            mutation: MutationConfig {
                numerator: 1,
                denominator: 100,
                magnitude: 16,
            },
            seed: None,
            update_interval: None,
            report_after: None,
        }
    }
}

impl GeneticConfig {
    pub fn from_yaml(content: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn read(path: &Path) -> Result<Self, Error> {
        Self::from_yaml(&read_to_string(path)?)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.population == 0 {
            return Err("初始种群数量必须为正".into());
        }
        if self.reserve == 0 {
            return Err("幸存数必须为正".into());
        }
        if self.offspring == 0 {
            return Err("子代数必须为正".into());
        }
        if self.update_interval == Some(0) {
            return Err("报告间隔必须为正".into());
        }
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() {
                return Err("选择阈值必须是有限实数".into());
            }
        }
        if let Some(report_after) = self.report_after {
            if !(0.0..=1.0).contains(&report_after) {
                return Err("保存进度比例必须在 0 到 1 之间".into());
            }
        }
        self.mutation.rate()?;
        Ok(())
    }
}
