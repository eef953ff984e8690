//! 变异与交叉算子
//!

use crate::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 变异概率，以分数 `numerator / denominator` 表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl MutationRate {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, Error> {
        let rate = Self {
            numerator,
            denominator,
        };
        rate.validate()?;
        Ok(rate)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.denominator == 0 {
            return Err("变异概率的分母不能为零".into());
        }
        if self.numerator > self.denominator {
            return Err(format!(
                "变异概率 {}/{} 大于 1",
                self.numerator, self.denominator
            )
            .into());
        }
        Ok(())
    }

    /// 对一个碱基做一次伯努利试验
    #[inline(always)]
    pub fn trial<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random_range(0..self.denominator) < self.numerator
    }
}

/// 由一个 [0, 1) 上的均匀随机数计算扰动量，取值范围为 [-magnitude, magnitude]
#[inline(always)]
pub fn perturbation(magnitude: u8, draw: f64) -> i32 {
    (2.0 * f64::from(magnitude) * (draw - 0.5)).round() as i32
}

/// 按 8 位模运算把扰动量加到碱基上
#[inline(always)]
pub fn wrapping_shift(base: u8, delta: i32) -> u8 {
    base.wrapping_add(delta.rem_euclid(256) as u8)
}

/// 随机扰动一个碱基
pub fn perturb<R: Rng + ?Sized>(base: u8, magnitude: u8, rng: &mut R) -> u8 {
    wrapping_shift(base, perturbation(magnitude, rng.random::<f64>()))
}

/// 单点交叉：在 [0, len] 中随机取一个切点，切点之前取父本，之后取母本
pub fn single_point<R: Rng + ?Sized>(rng: &mut R, father: &[u8], mother: &[u8]) -> Vec<u8> {
    let index = rng.random_range(0..=father.len());
    let mut child = Vec::with_capacity(mother.len().max(index));
    child.extend_from_slice(&father[..index]);
    child.extend_from_slice(mother.get(index..).unwrap_or_default());
    child
}
