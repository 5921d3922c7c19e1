//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化为文本：纯文本、彩色，或借助 ariadne 输出带源码标注的报告

use crate::diagnostic::Diagnostic;
use crate::span::{clamp, Span};
use ariadne::{Color, Config, Label, Report, Source};
use colored::*;
use std::fmt::Write as _;

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的输出器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断到 stderr
    pub fn emit(&self, diagnostic: &Diagnostic) {
        eprint!("{}", self.render(diagnostic));
    }

    /// 输出单个诊断到 stderr，并标注源码
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) {
        eprint!("{}", self.render_with_source(diagnostic, source));
    }

    /// 渲染为字符串（不带源码）
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        if self.use_colors {
            self.render_colored(diagnostic)
        } else {
            self.render_plain(diagnostic)
        }
    }

    /// 渲染带源码标注的报告
    ///
    /// 没有 span 的诊断退回到 [`Emitter::render`]。
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let Some(span) = &diagnostic.span else {
            return self.render(diagnostic);
        };
        let span = clamp(span, source.len());

        let mut label = Label::new(span.clone());
        if let Some(text) = &diagnostic.label {
            label = label.with_message(text);
        }
        if self.use_colors {
            label = label.with_color(Color::Red);
        }

        let mut report = Report::<Span>::build(diagnostic.level.report_kind(), (), span.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(&diagnostic.message)
            .with_label(label);
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
        if let Some(help) = &diagnostic.help {
            report = report.with_help(&help.message);
        }

        let mut buf = Vec::new();
        match report.finish().write(Source::from(source), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.render(diagnostic),
        }
    }

    /// 输出带颜色的诊断
    fn render_colored(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        // 级别和消息
        let _ = writeln!(
            out,
            "{}: {}",
            diagnostic.level.colored_name(),
            diagnostic.message.bold()
        );

        if let Some(span) = &diagnostic.span {
            let _ = writeln!(out, "  {} {:?}", "-->".blue().bold(), span);
        }

        for note in &diagnostic.notes {
            let _ = writeln!(
                out,
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            );
        }

        if let Some(help) = &diagnostic.help {
            let _ = writeln!(
                out,
                "  {} {}",
                "=".green().bold(),
                format!("help: {}", help.message).green()
            );
            if let Some(replacement) = &help.replacement {
                let _ = writeln!(out, "        try: {}", replacement.green().italic());
            }
        }
        out
    }

    /// 输出纯文本诊断
    fn render_plain(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", diagnostic.level, diagnostic.message);

        if let Some(span) = &diagnostic.span {
            let _ = writeln!(out, "  --> {:?}", span);
        }

        for note in &diagnostic.notes {
            let _ = writeln!(out, "  = note: {}", note);
        }

        if let Some(help) = &diagnostic.help {
            let _ = writeln!(out, "  = help: {}", help.message);
            if let Some(replacement) = &help.replacement {
                let _ = writeln!(out, "        try: {}", replacement);
            }
        }
        out
    }
}
