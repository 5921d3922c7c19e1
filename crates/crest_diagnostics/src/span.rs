//! Span - 源码位置信息

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

/// 将 span 截断到源码长度以内
///
/// 输入结束 (EOI) 的 span 是 `len..len + 1`，渲染前需要收回到 `len..len`。
pub fn clamp(span: &Span, source_len: usize) -> Span {
    let start = span.start.min(source_len);
    let end = span.end.min(source_len).max(start);
    start..end
}
