//! 优化方法，把调用者驱动的代际循环封装为可复用的求解过程
//!

pub mod genetic;

/// 一次优化得到的最佳个体
#[derive(Debug, Clone)]
pub struct OptimizationResult<G> {
    pub genotype: G,
    pub fitness: f64,
    /// 最佳个体出现的代数
    pub generation: usize,
    /// 每次评价后种群中的最佳评价
    pub history: Vec<f64>,
}
