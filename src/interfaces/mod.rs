use serde::Serialize;
use serde_with::skip_serializing_none;
use std::cell::RefCell;

pub mod command_line;

/// 向用户反馈的消息类型
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Progress {
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        best: String,
    },
    BetterSolution {
        generation: usize,
        fitness: f64,
        genotype: String,
        save: bool,
    },
    Elapsed {
        time: u64,
    },
    Finished {
        generations: usize,
        fitness: f64,
        genotype: String,
    },
}

/// 定义了向用户报告消息的接口，用于统一各种输出方式
///
/// 命令行界面只需实现 post 方法，就可向用户报告运行过程中的各种数据
pub trait Interface {
    fn post(&self, message: Message);
}

/// 把收到的消息依次记录下来，不做任何输出
#[derive(Debug, Default)]
pub struct Recorder {
    messages: RefCell<Vec<Message>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }
}

impl Interface for Recorder {
    fn post(&self, message: Message) {
        self.messages.borrow_mut().push(message);
    }
}
