//! libgenetic 是使用 Rust 实现的通用遗传算法引擎。
//!
//! 每个候选解由一组定长的字节序列（染色体）表示，调用者提供基因型与染色体之间的转换、随机初始化器、
//! 适应度函数和交叉函数，引擎负责种群的维护以及初始化、评价、选择、交叉、变异这一流水线。
//!
//! genetic 是使用 libgenetic 实现的命令行程序，用于演示在二元二次函数上的优化过程。

pub mod config;
pub mod engine;
pub mod error;
pub mod genotype;
pub mod interfaces;
pub mod operators;
pub mod optimizers;
pub mod population;

pub use engine::Engine;
pub use error::Error;
pub use genotype::{Genotype, Schema};
pub use operators::MutationRate;
pub use population::{Chromosome, Individual, Population};
