//! 遗传算法

use super::OptimizationResult;
use crate::config::GeneticConfig;
use crate::engine::Engine;
use crate::genotype::Genotype;
use crate::interfaces::{Interface, Message};
use crate::Error;
use std::fmt::Display;
use tracing::info;
use web_time::Instant;

pub struct GeneticAlgorithm {
    pub config: GeneticConfig,
}

impl GeneticAlgorithm {
    pub fn new(config: GeneticConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 按配置中的种子创建引擎
    pub fn engine<G: Genotype>(&self) -> Result<Engine<G>, Error> {
        match self.config.seed {
            Some(seed) => Engine::with_seed(seed),
            None => Engine::new(),
        }
    }

    /// 遗传算法求解的主函数
    ///
    /// 先随机初始化种群，然后每一代依次评价、选择、交叉、变异。全部迭代结束后再评价一次，
    /// 所以返回时引擎中的种群总是评价过的。
    pub fn optimize<G, R, F, C, E>(
        &self,
        engine: &mut Engine<G>,
        random_factory: R,
        mut fitness: F,
        mut cross: C,
        interface: &dyn Interface,
    ) -> Result<OptimizationResult<G>, Error>
    where
        G: Genotype + Display,
        R: FnMut(usize) -> Vec<u8>,
        F: FnMut(&[G]) -> Vec<f64>,
        C: FnMut(&[u8], &[u8]) -> Result<Vec<u8>, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.config.validate()?;
        let GeneticConfig {
            population,
            generations,
            reserve,
            threshold,
            offspring,
            mutation,
            ..
        } = self.config;
        let rate = mutation.rate()?;
        let update_interval = self.config.update_interval.unwrap_or(100);
        let report_after = self.config.report_after.unwrap_or(0.9);

        engine.initialize(population, random_factory)?;
        info!(population, generations, "开始迭代");
        let start = Instant::now();
        let mut history = Vec::with_capacity(generations + 1);
        let mut best: Option<(G, f64, usize)> = None;

        for generation in 0..generations {
            engine.evaluate(&mut fitness)?;
            engine.select(reserve, threshold)?;
            let (genotype, value) = engine.best_genotype()?;
            history.push(value);
            if best.as_ref().map_or(true, |(_, f, _)| value > *f) {
                let progress = generation as f64 / generations as f64;
                interface.post(Message::BetterSolution {
                    generation,
                    fitness: value,
                    genotype: genotype.to_string(),
                    save: progress > report_after,
                });
                best = Some((genotype, value, generation));
            }
            // 每过一定的代数，报告当前状态和计算速度
            if generation % update_interval == 0 || generation + 1 == generations {
                interface.post(Message::Progress {
                    generation,
                    best_fitness: value,
                    mean_fitness: mean_fitness(engine),
                    best: engine.describe_best()?,
                });
                if generation == update_interval {
                    let elapsed = start.elapsed().as_micros() as u64 / update_interval as u64;
                    interface.post(Message::Elapsed { time: elapsed });
                }
            }
            engine.crossover(offspring, &mut cross)?;
            engine.mutate(rate, mutation.magnitude)?;
        }

        engine.evaluate(&mut fitness)?;
        let (genotype, value) = engine.best_genotype()?;
        history.push(value);
        let (genotype, best_fitness, generation) = match best {
            Some(previous) if previous.1 >= value => previous,
            _ => (genotype, value, generations),
        };
        info!(best_fitness, generation, "迭代结束");
        interface.post(Message::Finished {
            generations,
            fitness: best_fitness,
            genotype: genotype.to_string(),
        });
        Ok(OptimizationResult {
            genotype,
            fitness: best_fitness,
            generation,
            history,
        })
    }
}

fn mean_fitness<G: Genotype>(engine: &Engine<G>) -> f64 {
    let values: Vec<f64> = engine
        .population()
        .iter()
        .filter_map(|individual| individual.fitness())
        .collect();
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
