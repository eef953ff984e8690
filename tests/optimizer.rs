use genetic::config::{GeneticConfig, MutationConfig};
use genetic::interfaces::{Message, Recorder};
use genetic::operators::single_point;
use genetic::optimizers::genetic::GeneticAlgorithm;
use genetic::{Chromosome, Engine, Error, Genotype, MutationRate, Schema};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::convert::Infallible;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

fn to_f64(chromosome: &Chromosome) -> f64 {
    let mut buffer = [0u8; 8];
    buffer.copy_from_slice(chromosome.as_bytes());
    f64::from_le_bytes(buffer)
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

fn quadratic(point: &Point) -> f64 {
    let Point { x, y } = *point;
    let value = -(x * x - 4.0 * x + y * y + 9.0 * y - x * y - 10.0);
    if value.is_finite() {
        value
    } else {
        f64::MIN
    }
}

fn random_point(rng: &mut StdRng) -> Vec<u8> {
    ((0.5 - rng.random::<f64>()) * 10.0).to_le_bytes().to_vec()
}

/// 二元二次函数的最大值在 (-1/3, -14/3) 处取得，为 91/3
const OPTIMUM: f64 = 91.0 / 3.0;

#[test]
fn quadratic_scenario_improves_over_generations() -> Result<(), Error> {
    let mut engine = Engine::<Point>::with_seed(2024)?;
    let mut init_rng = StdRng::seed_from_u64(1);
    let mut cross_rng = StdRng::seed_from_u64(2);
    engine.initialize(100, |_| random_point(&mut init_rng))?;

    let mut history = vec![];
    for _ in 0..1000 {
        engine.evaluate(|points| points.iter().map(quadratic).collect())?;
        engine.select(20, None)?;
        history.push(engine.best()?.fitness().unwrap_or(f64::MIN));
        engine.crossover(100, |father, mother| {
            Ok::<_, Infallible>(single_point(&mut cross_rng, father, mother))
        })?;
        engine.mutate(MutationRate::new(1, 100)?, 16)?;
    }
    engine.evaluate(|points| points.iter().map(quadratic).collect())?;

    let first = history[0];
    let late = history[900..].iter().cloned().fold(f64::MIN, f64::max);
    assert!(late >= first, "最后 100 代的最佳评价 {late} 低于第一代 {first}");
    assert!(late > 30.0 && late <= OPTIMUM + 1e-9);

    let (point, fitness) = engine.best_genotype()?;
    assert_eq!(quadratic(&point), fitness);
    let description = engine.describe_best()?;
    assert!(description.starts_with(&format!("个体={point}[染色体[")));
    assert!(description.ends_with(&format!("量化评价 = {fitness}")));
    Ok(())
}

fn small_config(seed: u64) -> GeneticConfig {
    GeneticConfig {
        population: 40,
        generations: 60,
        reserve: 10,
        threshold: None,
        offspring: 40,
        mutation: MutationConfig {
            numerator: 1,
            denominator: 100,
            magnitude: 16,
        },
        seed: Some(seed),
        update_interval: Some(20),
        report_after: Some(0.5),
    }
}

fn run(config: GeneticConfig) -> Result<(Vec<Message>, f64, usize, Vec<f64>), Error> {
    let algorithm = GeneticAlgorithm::new(config)?;
    let mut engine = algorithm.engine::<Point>()?;
    let mut init_rng = StdRng::seed_from_u64(3);
    let mut cross_rng = StdRng::seed_from_u64(4);
    let recorder = Recorder::new();
    let result = algorithm.optimize(
        &mut engine,
        |_| random_point(&mut init_rng),
        |points: &[Point]| points.iter().map(quadratic).collect(),
        |father, mother| Ok::<_, Infallible>(single_point(&mut cross_rng, father, mother)),
        &recorder,
    )?;
    // 返回时种群已经评价过
    engine.describe_best()?;
    assert_eq!(quadratic(&result.genotype), result.fitness);
    Ok((
        recorder.messages(),
        result.fitness,
        result.generation,
        result.history,
    ))
}

#[test]
fn genetic_algorithm_reports_progress_and_best() -> Result<(), Error> {
    let (messages, fitness, generation, history) = run(small_config(5))?;
    assert_eq!(history.len(), 61);
    assert_eq!(fitness, history.iter().cloned().fold(f64::MIN, f64::max));
    assert!(generation <= 60);

    let progress: Vec<usize> = messages
        .iter()
        .filter_map(|message| match message {
            Message::Progress { generation, .. } => Some(*generation),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![0, 20, 40, 59]);
    assert!(messages
        .iter()
        .any(|message| matches!(message, Message::Elapsed { .. })));

    let improvements: Vec<f64> = messages
        .iter()
        .filter_map(|message| match message {
            Message::BetterSolution { fitness, .. } => Some(*fitness),
            _ => None,
        })
        .collect();
    assert!(!improvements.is_empty());
    assert!(improvements.windows(2).all(|pair| pair[1] > pair[0]));

    match messages.last() {
        Some(Message::Finished {
            generations,
            fitness: reported,
            ..
        }) => {
            assert_eq!(*generations, 60);
            assert_eq!(*reported, fitness);
        }
        _ => panic!("最后一条消息应当是运行结束"),
    }
    Ok(())
}

#[test]
fn genetic_algorithm_is_reproducible_with_a_seed() -> Result<(), Error> {
    let (_, first, _, first_history) = run(small_config(6))?;
    let (_, second, _, second_history) = run(small_config(6))?;
    assert_eq!(first, second);
    assert_eq!(first_history, second_history);
    Ok(())
}

#[test]
fn genetic_algorithm_rejects_invalid_config() {
    let mut config = small_config(7);
    config.reserve = 0;
    assert!(matches!(
        GeneticAlgorithm::new(config),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn config_reads_yaml_with_defaults() -> Result<(), Error> {
    let config = GeneticConfig::from_yaml(
        "population: 100\n\
         generations: 1000\n\
         reserve: 20\n\
         offspring: 100\n\
         mutation:\n  numerator: 1\n  denominator: 100\n  magnitude: 16\n",
    )?;
    assert_eq!(config, GeneticConfig::default());
    assert!(!config.to_yaml()?.contains("threshold"));

    let invalid = GeneticConfig::from_yaml(
        "population: 10\n\
         generations: 10\n\
         reserve: 5\n\
         offspring: 10\n\
         mutation:\n  numerator: 1\n  denominator: 0\n  magnitude: 16\n",
    );
    assert!(matches!(invalid, Err(Error::Configuration(_))));
    assert!(matches!(
        GeneticConfig::from_yaml("population: [1]"),
        Err(Error::Yaml(_))
    ));
    Ok(())
}

#[test]
fn genetic_algorithm_revalidates_config_before_running() -> Result<(), Error> {
    let mut algorithm = GeneticAlgorithm::new(small_config(8))?;
    algorithm.config.update_interval = Some(0);
    let mut engine = algorithm.engine::<Point>()?;
    let mut init_rng = StdRng::seed_from_u64(3);
    let recorder = Recorder::new();
    let result = algorithm.optimize(
        &mut engine,
        |_| random_point(&mut init_rng),
        |points: &[Point]| points.iter().map(quadratic).collect(),
        |father: &[u8], _: &[u8]| Ok::<_, Infallible>(father.to_vec()),
        &recorder,
    );
    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(recorder.messages().is_empty());
    assert!(engine.is_empty());
    Ok(())
}

#[test]
fn config_rejects_report_after_outside_unit_interval() {
    for report_after in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
        let mut config = small_config(9);
        config.report_after = Some(report_after);
        assert!(
            matches!(config.validate(), Err(Error::Configuration(_))),
            "保存进度比例 {report_after} 应当被拒绝"
        );
    }
    for report_after in [0.0, 0.9, 1.0] {
        let mut config = small_config(9);
        config.report_after = Some(report_after);
        assert!(config.validate().is_ok());
    }
}
