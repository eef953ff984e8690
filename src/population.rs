//! 染色体、个体与种群

use itertools::Itertools;
use std::fmt::Display;

/// 染色体，由一条定长的 DNA 序列组成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    dna: Vec<u8>,
}

impl Chromosome {
    pub fn new(dna: Vec<u8>) -> Self {
        Self { dna }
    }

    pub fn len(&self) -> usize {
        self.dna.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dna.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.dna
    }

    /// 只有变异操作会原地修改 DNA
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.dna
    }
}

impl AsRef<[u8]> for Chromosome {
    fn as_ref(&self) -> &[u8] {
        &self.dna
    }
}

impl Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "染色体[{}]", self.dna.iter().join(", "))
    }
}

/// 个体：一组染色体和它的量化评价
///
/// 评价在第一次评价种群之前为 `None`。
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    chromosomes: Vec<Chromosome>,
    fitness: Option<f64>,
}

impl Individual {
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self {
            chromosomes,
            fitness: None,
        }
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub(crate) fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}], 量化评价 = ", self.chromosomes.iter().join(", "))?;
        match self.fitness {
            Some(fitness) => write!(f, "{fitness}"),
            None => f.write_str("未评价"),
        }
    }
}

/// 种群，除了刚刚完成选择之后，个体的顺序没有排名含义
pub type Population = Vec<Individual>;
