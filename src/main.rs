//! genetic: 遗传算法［命令行版］
//!
//! 在二元二次函数 `-(x² - 4x + y² + 9y - xy - 10)` 上演示遗传算法的优化过程，
//! 每个个体由两条 8 字节的染色体组成，分别存放 x 和 y 的双精度浮点表示。

use clap::Parser;
use genetic::interfaces::command_line::{Command, CommandLine, CommandLineArgs};
use genetic::operators::single_point;
use genetic::optimizers::genetic::GeneticAlgorithm;
use genetic::{Chromosome, Error, Genotype, Schema};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::convert::Infallible;
use std::fmt::Display;

fn to_f64(chromosome: &Chromosome) -> f64 {
    let mut buffer = [0u8; 8];
    buffer.copy_from_slice(chromosome.as_bytes());
    f64::from_le_bytes(buffer)
}

/// 平面上的一个点
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl Genotype for Point {
    fn schema() -> Schema {
        Schema::new(vec![8, 8])
    }

    fn encode(&self) -> Vec<Vec<u8>> {
        vec![self.x.to_le_bytes().to_vec(), self.y.to_le_bytes().to_vec()]
    }

    fn decode(chromosomes: &[Chromosome]) -> Self {
        Self {
            x: to_f64(&chromosomes[0]),
            y: to_f64(&chromosomes[1]),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 一个实数
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scalar(f64);

impl Genotype for Scalar {
    fn schema() -> Schema {
        Schema::new(vec![8])
    }

    fn encode(&self) -> Vec<Vec<u8>> {
        vec![self.0.to_le_bytes().to_vec()]
    }

    fn decode(chromosomes: &[Chromosome]) -> Self {
        Self(to_f64(&chromosomes[0]))
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 变异可能把浮点数变成无穷大或非数，这样的个体给予最低评价
fn finite_or_worst(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::MIN
    }
}

fn quadratic(point: &Point) -> f64 {
    let Point { x, y } = *point;
    finite_or_worst(-(x * x - 4.0 * x + y * y + 9.0 * y - x * y - 10.0))
}

fn parabola(scalar: &Scalar) -> f64 {
    finite_or_worst(-(scalar.0 - 3.0).powi(2))
}

/// 同一个种子为初始化和交叉分别派生出独立的随机数生成器
fn derive_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();
    let args = CommandLineArgs::parse();
    let config = args.prepare_config()?;
    let cli = CommandLine::new(args.output.clone(), args.json);
    let mut init_rng = derive_rng(config.seed, 1);
    let mut cross_rng = derive_rng(config.seed, 2);
    let cross = |father: &[u8], mother: &[u8]| {
        Ok::<_, Infallible>(single_point(&mut cross_rng, father, mother))
    };
    match args.command {
        Command::ShowConfig => {
            print!("{}", config.to_yaml()?);
        }
        Command::Optimize => {
            let algorithm = GeneticAlgorithm::new(config)?;
            let mut engine = algorithm.engine::<Point>()?;
            let random = |_: usize| {
                let value = (0.5 - init_rng.random::<f64>()) * 10.0;
                value.to_le_bytes().to_vec()
            };
            let fitness =
                |points: &[Point]| -> Vec<f64> { points.iter().map(quadratic).collect() };
            algorithm.optimize(&mut engine, random, fitness, cross, &cli)?;
            println!("{}", engine.describe_best()?);
        }
        Command::Scalar => {
            let algorithm = GeneticAlgorithm::new(config)?;
            let mut engine = algorithm.engine::<Scalar>()?;
            let random = |_: usize| (init_rng.random::<f64>() * 10.0).to_le_bytes().to_vec();
            let fitness =
                |values: &[Scalar]| -> Vec<f64> { values.iter().map(parabola).collect() };
            algorithm.optimize(&mut engine, random, fitness, cross, &cli)?;
            println!("{}", engine.describe_best()?);
        }
    }
    Ok(())
}
