//! Lexical Scope
//!
//! 编译期作用域链。值绑定（let 值与函数参数）占用一个运行时帧，
//! 函数绑定只登记函数表索引，不占帧。
//! 每个条目记录是否被引用过，出栈时交给调用者生成未使用警告。

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// 第 `slot` 层帧（从最外层 0 开始计数）
    Value { slot: usize },
    /// 函数表第 `index` 项，定义时帧深度为 `depth`
    Function {
        index: usize,
        arity: usize,
        depth: usize,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    binding: Binding,
    used: Cell<bool>,
}

#[derive(Debug, Default)]
pub struct ScopeChain {
    entries: Vec<Entry>,
    depth: usize,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前运行时帧深度
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn push_value(&mut self, name: &str) {
        self.entries.push(Entry {
            name: name.to_string(),
            binding: Binding::Value { slot: self.depth },
            used: Cell::new(false),
        });
        self.depth += 1;
    }

    pub fn push_function(&mut self, name: &str, index: usize, arity: usize) {
        self.entries.push(Entry {
            name: name.to_string(),
            binding: Binding::Function {
                index,
                arity,
                depth: self.depth,
            },
            used: Cell::new(false),
        });
    }

    /// 弹出最内层条目，返回它是否被引用过
    pub fn pop(&mut self) -> bool {
        match self.entries.pop() {
            Some(entry) => {
                if let Binding::Value { .. } = entry.binding {
                    self.depth -= 1;
                }
                entry.used.get()
            }
            None => false,
        }
    }

    /// 由内向外查找，内层遮蔽外层；找到的条目记为已使用
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.name == name)
            .map(|entry| {
                entry.used.set(true);
                entry.binding
            })
    }

    /// 从当前位置到 `slot` 层帧需要向上跳的帧数
    pub fn hops_to(&self, slot: usize) -> usize {
        self.depth - 1 - slot
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}
