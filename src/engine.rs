//! 遗传算法引擎
//!
//! 引擎持有种群和染色体描述，提供初始化、评价、选择、交叉和变异五个操作。
//! 代际循环由调用者驱动，通常的顺序是评价 → 选择 → 交叉 → 变异。

use crate::genotype::{Genotype, Schema};
use crate::operators::{perturb, MutationRate};
use crate::population::{Chromosome, Individual, Population};
use crate::Error;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Display;
use std::marker::PhantomData;
use std::mem::take;
use tracing::{debug, warn};

pub struct Engine<G: Genotype> {
    schema: Schema,
    population: Population,
    rng: StdRng,
    _genotype: PhantomData<fn() -> G>,
}

impl<G: Genotype> Engine<G> {
    /// 使用系统熵源初始化随机数生成器
    pub fn new() -> Result<Self, Error> {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// 使用固定的种子，相同的种子和相同的回调会得到完全相同的结果
    pub fn with_seed(seed: u64) -> Result<Self, Error> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Result<Self, Error> {
        let schema = G::schema();
        schema.validate()?;
        debug!(
            chromosome_count = schema.chromosome_count,
            lengths = ?schema.chromosome_lengths,
            "染色体描述校验通过"
        );
        Ok(Self {
            schema,
            population: Vec::new(),
            rng,
            _genotype: PhantomData,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// 随机初始化种群
    ///
    /// 对每个个体的第 `j` 条染色体调用一次 `random_factory(j)`，返回的 DNA 长度必须符合描述。
    /// 任何一条不符合都会使整个初始化失败，原有种群保持不变。
    pub fn initialize<F>(&mut self, size: usize, mut random_factory: F) -> Result<(), Error>
    where
        F: FnMut(usize) -> Vec<u8>,
    {
        let mut population = Vec::with_capacity(size);
        for _ in 0..size {
            let mut chromosomes = Vec::with_capacity(self.schema.chromosome_count);
            for slot in 0..self.schema.chromosome_count {
                let dna = random_factory(slot);
                self.schema.check(slot, &dna)?;
                chromosomes.push(Chromosome::new(dna));
            }
            population.push(Individual::new(chromosomes));
        }
        self.population = population;
        debug!(size, "初始化种群");
        Ok(())
    }

    /// 用给定的基因型组成种群
    pub fn populate(&mut self, genotypes: &[G]) -> Result<(), Error> {
        let mut population = Vec::with_capacity(genotypes.len());
        for genotype in genotypes {
            let dna = genotype.encode();
            self.schema.check_all(&dna)?;
            population.push(Individual::new(dna.into_iter().map(Chromosome::new).collect()));
        }
        self.population = population;
        debug!(size = genotypes.len(), "由基因型组成种群");
        Ok(())
    }

    /// 评价种群
    ///
    /// 适应度函数只调用一次，接收按种群顺序排列的全部基因型，返回等长的评价列表。
    pub fn evaluate<F>(&mut self, fitness: F) -> Result<(), Error>
    where
        F: FnOnce(&[G]) -> Vec<f64>,
    {
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        let genotypes: Vec<G> = self
            .population
            .iter()
            .map(|individual| G::decode(individual.chromosomes()))
            .collect();
        let values = fitness(&genotypes);
        if values.len() != self.population.len() {
            return Err(Error::EvaluationSizeMismatch {
                expected: self.population.len(),
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(Error::NonFiniteFitness { index });
        }
        for (individual, value) in self.population.iter_mut().zip(values) {
            individual.set_fitness(value);
        }
        debug!(size = self.population.len(), "评价种群");
        Ok(())
    }

    /// 选择评价最高的 `reserve` 个个体，其余淘汰
    ///
    /// 排序是稳定的，评价相同的个体保持原有的相对顺序。若设置了阈值，再淘汰评价不高于阈值的个体，
    /// 然后从幸存者中有放回地随机复制个体，直到种群恢复为 `reserve` 个。
    pub fn select(&mut self, reserve: usize, threshold: Option<f64>) -> Result<(), Error> {
        let scores = self.scores()?;
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(reserve);

        if let Some(threshold) = threshold {
            order.retain(|&index| scores[index] > threshold);
            if order.is_empty() && reserve > 0 {
                warn!(threshold, "阈值筛选后没有幸存个体");
                return Err(Error::NoSurvivors { threshold });
            }
        }

        let mut slots: Vec<Option<Individual>> = take(&mut self.population)
            .into_iter()
            .map(Some)
            .collect();
        let mut survivors: Population = order
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect();

        // 随机复制个体补全种群
        if threshold.is_some() {
            let count = survivors.len();
            while survivors.len() < reserve {
                let index = self.rng.random_range(0..count);
                survivors.push(survivors[index].clone());
            }
        }
        debug!(
            reserve,
            survivors = order.len(),
            size = survivors.len(),
            "选择种群"
        );
        self.population = survivors;
        Ok(())
    }

    /// 交叉互换，用 `offspring` 个子代替换整个种群
    ///
    /// 每个子代的父本和母本都从当前种群中有放回地随机选取，可以是同一个个体。
    /// 对每条染色体调用一次 `cross(father, mother)`，其错误原样传回调用者；
    /// 返回的 DNA 长度必须符合描述。任何失败都不会改变当前种群。
    pub fn crossover<F, E>(&mut self, offspring: usize, mut cross: F) -> Result<(), Error>
    where
        F: FnMut(&[u8], &[u8]) -> Result<Vec<u8>, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        let size = self.population.len();
        let mut children = Vec::with_capacity(offspring);
        for _ in 0..offspring {
            let father = &self.population[self.rng.random_range(0..size)];
            let mother = &self.population[self.rng.random_range(0..size)];
            let mut chromosomes = Vec::with_capacity(self.schema.chromosome_count);
            for (slot, (f, m)) in father
                .chromosomes()
                .iter()
                .zip(mother.chromosomes())
                .enumerate()
            {
                let dna = cross(f.as_bytes(), m.as_bytes())
                    .map_err(|error| Error::Crossover(error.into()))?;
                self.schema.check(slot, &dna)?;
                chromosomes.push(Chromosome::new(dna));
            }
            children.push(Individual::new(chromosomes));
        }
        self.population = children;
        debug!(parents = size, offspring, "交叉互换");
        Ok(())
    }

    /// 遗传变异，返回发生突变的碱基数
    ///
    /// 每个个体的每条染色体上的每个碱基都独立地以 `rate` 的概率突变，
    /// 突变时加上 [-magnitude, magnitude] 之间的扰动量，按 8 位回绕。
    pub fn mutate(&mut self, rate: MutationRate, magnitude: u8) -> Result<usize, Error> {
        rate.validate()?;
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        let mut mutated = 0;
        for individual in self.population.iter_mut() {
            for chromosome in individual.chromosomes_mut() {
                for base in chromosome.as_bytes_mut() {
                    if rate.trial(&mut self.rng) {
                        *base = perturb(*base, magnitude, &mut self.rng);
                        mutated += 1;
                    }
                }
            }
        }
        debug!(mutated, "遗传变异");
        Ok(mutated)
    }

    /// 最佳个体的位置，评价相同时取靠前的一个
    pub fn best_index(&self) -> Result<usize, Error> {
        let scores = self.scores()?;
        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        Ok(best)
    }

    pub fn best(&self) -> Result<&Individual, Error> {
        Ok(&self.population[self.best_index()?])
    }

    /// 最佳个体的基因型和评价
    pub fn best_genotype(&self) -> Result<(G, f64), Error> {
        let best = self.best()?;
        let fitness = best.fitness().ok_or(Error::Unevaluated)?;
        Ok((G::decode(best.chromosomes()), fitness))
    }

    fn scores(&self) -> Result<Vec<f64>, Error> {
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        self.population
            .iter()
            .map(|individual| individual.fitness().ok_or(Error::Unevaluated))
            .collect()
    }
}

impl<G: Genotype + Display> Engine<G> {
    fn describe(individual: &Individual) -> String {
        format!("个体={}{}", G::decode(individual.chromosomes()), individual)
    }

    /// 获得能够表示当前种群的字符串
    pub fn describe_population(&self) -> String {
        let mut text = String::from("----遗传算法 种群表----\n");
        text += &format!(
            "种群容量: {}, 染色体条数: {}\nDNA长度: {}\n",
            self.population.len(),
            self.schema.chromosome_count,
            self.schema.chromosome_lengths.iter().join(", ")
        );
        text += &"-".repeat(65);
        text.push('\n');
        for individual in &self.population {
            text += &Self::describe(individual);
            text.push('\n');
        }
        text
    }

    /// 获得能够表示当前最佳个体的字符串
    pub fn describe_best(&self) -> Result<String, Error> {
        Ok(Self::describe(self.best()?))
    }
}
