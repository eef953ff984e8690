use crate::config::GeneticConfig;
use crate::interfaces::{Interface, Message};
use crate::Error;
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::{create_dir_all, write};
use std::io::Write;
use std::path::PathBuf;
use tracing::error;

/// 命令行参数的定义
#[derive(Parser, Clone)]
#[command(name = "遗传算法")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,
    /// 运行参数文件，不提供时使用默认参数
    pub config: Option<PathBuf>,
    /// 随机数种子，覆盖参数文件中的设置
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// 迭代代数，覆盖参数文件中的设置
    #[arg(short, long)]
    pub generations: Option<usize>,
    /// 输出目录，默认为 output- 加当前时间
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    /// 以 JSON 行的形式输出消息
    #[arg(long)]
    pub json: bool,
}

/// 命令行中所有可用的子命令
#[derive(Subcommand, Clone)]
pub enum Command {
    /// 在二元二次函数上优化
    Optimize,
    /// 在一元二次函数上优化
    Scalar,
    /// 输出实际使用的运行参数
    ShowConfig,
}

impl CommandLineArgs {
    /// 读取参数文件并应用命令行上的覆盖项
    pub fn prepare_config(&self) -> Result<GeneticConfig, Error> {
        let mut config = match &self.config {
            Some(path) => GeneticConfig::read(path)?,
            None => GeneticConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct SavedIndividual<'a> {
    generation: usize,
    fitness: f64,
    genotype: &'a str,
}

/// 通过命令行来使用遗传算法的入口，实现了界面特征
pub struct CommandLine {
    pub output_dir: PathBuf,
    /// 以 JSON 行的形式输出消息
    pub json: bool,
}

impl CommandLine {
    pub fn new(maybe_output_dir: Option<PathBuf>, json: bool) -> Self {
        let output_dir = maybe_output_dir.unwrap_or_else(|| {
            let time = Local::now().format("%m-%d+%H_%M_%S").to_string();
            PathBuf::from(format!("output-{time}"))
        });
        Self { output_dir, json }
    }

    fn save(&self, generation: usize, fitness: f64, genotype: &str) -> std::io::Result<String> {
        create_dir_all(&self.output_dir)?;
        let prefix = Local::now().format("%m-%d+%H_%M_%S_%3f").to_string();
        let content = serde_yaml::to_string(&SavedIndividual {
            generation,
            fitness,
            genotype,
        })
        .map_err(std::io::Error::other)?;
        write(self.output_dir.join(format!("{prefix}.yaml")), content)?;
        Ok(prefix)
    }

    /// 把一条消息写入 `writer`，需要保存的个体同时写入输出目录
    pub fn render(&self, message: &Message, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.json {
            let line = serde_json::to_string(message).map_err(std::io::Error::other)?;
            return writeln!(writer, "{line}");
        }
        match message {
            Message::Progress {
                generation,
                best_fitness,
                mean_fitness,
                best,
            } => writeln!(
                writer,
                "迭代[{generation}]执行完毕，最佳评价 {best_fitness:.6}，平均评价 {mean_fitness:.6}\n{best}"
            ),
            Message::Elapsed { time } => writeln!(writer, "计算一代用时：{time} μs"),
            Message::BetterSolution {
                generation,
                fitness,
                genotype,
                save,
            } => {
                let time = Local::now();
                writeln!(
                    writer,
                    "{} 第 {generation} 代搜索到了一个更好的个体 {genotype}，量化评价 = {fitness}",
                    time.format("%H:%M:%S"),
                )?;
                if *save {
                    let prefix = self.save(*generation, *fitness, genotype)?;
                    writeln!(writer, "个体保存于 {prefix}.yaml 中")?;
                }
                Ok(())
            }
            Message::Finished {
                generations,
                fitness,
                genotype,
            } => writeln!(
                writer,
                "共迭代 {generations} 代，最佳个体 {genotype}，量化评价 = {fitness}"
            ),
        }
    }
}

impl Interface for CommandLine {
    fn post(&self, message: Message) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = self.render(&message, &mut stdout) {
            error!("无法输出消息：{e}");
        }
    }
}
