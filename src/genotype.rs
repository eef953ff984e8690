//! 基因型与染色体之间的转换接口
//!
//! 每一种基因型都需要声明自己的染色体描述（染色体条数以及每条染色体上 DNA 序列的长度），
//! 并实现与染色体组之间的双向转换。引擎在构造时校验这个描述，之后所有产生染色体的操作都以它为准。

use crate::population::Chromosome;
use crate::Error;

/// 染色体描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub chromosome_count: usize,
    pub chromosome_lengths: Vec<usize>,
}

impl Schema {
    pub fn new(chromosome_lengths: Vec<usize>) -> Self {
        Self {
            chromosome_count: chromosome_lengths.len(),
            chromosome_lengths,
        }
    }

    /// 检查描述本身是否自洽
    pub fn validate(&self) -> Result<(), Error> {
        if self.chromosome_count == 0 {
            return Err("染色体条数不能为零".into());
        }
        if self.chromosome_lengths.len() != self.chromosome_count {
            return Err(format!(
                "声明了 {} 条染色体，却给出了 {} 个 DNA 长度",
                self.chromosome_count,
                self.chromosome_lengths.len()
            )
            .into());
        }
        if let Some(slot) = self.chromosome_lengths.iter().position(|&length| length == 0) {
            return Err(format!("第 {slot} 条染色体的 DNA 长度不能为零").into());
        }
        Ok(())
    }

    /// 检查某一位置上的 DNA 序列长度
    pub fn check(&self, slot: usize, dna: &[u8]) -> Result<(), Error> {
        let expected = *self
            .chromosome_lengths
            .get(slot)
            .ok_or_else(|| Error::from(format!("不存在第 {slot} 条染色体")))?;
        if dna.len() != expected {
            return Err(Error::SchemaMismatch {
                slot,
                expected,
                actual: dna.len(),
            });
        }
        Ok(())
    }

    /// 检查一整组 DNA 序列
    pub fn check_all<D: AsRef<[u8]>>(&self, dna: &[D]) -> Result<(), Error> {
        if dna.len() != self.chromosome_count {
            return Err(format!(
                "应有 {} 条染色体，实际为 {} 条",
                self.chromosome_count,
                dna.len()
            )
            .into());
        }
        for (slot, chain) in dna.iter().enumerate() {
            self.check(slot, chain.as_ref())?;
        }
        Ok(())
    }
}

/// 可以被序列化为染色体的基因型
///
/// 要求 `decode(encode(g))` 与 `g` 完全一致。
pub trait Genotype: Sized {
    /// 该基因型的染色体描述，在引擎的整个生命周期内保持不变
    fn schema() -> Schema;

    /// 获得基因型的各条 DNA 序列
    fn encode(&self) -> Vec<Vec<u8>>;

    /// 由染色体组还原基因型，传入的染色体组总是符合描述的
    fn decode(chromosomes: &[Chromosome]) -> Self;
}
