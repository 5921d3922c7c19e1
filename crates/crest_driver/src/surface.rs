//! Surface Sampling
//!
//! 在 [min, max)² 网格上求值，每个格子输出四个顶点：
//! 左上、左下、右上、右下，对应两个三角形 (0, 1, 2) 和 (2, 1, 3)。

use crest_codegen::Evaluator;

use crate::model::{SurfaceModel, GRID_CELLS};

/// 曲面上的点，`z` 为求值结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 采样整个网格
///
/// `out` 会被清空后复用，避免每帧重新分配。`max <= min` 时不输出任何顶点。
pub fn sample(evaluator: &Evaluator, min: f64, max: f64, t: f64, out: &mut Vec<Vertex>) {
    out.clear();
    if !(max > min) {
        return;
    }

    let step = (max - min) / GRID_CELLS as f64;
    out.reserve(GRID_CELLS * GRID_CELLS * 4);
    let at = |x: f64, y: f64| Vertex {
        x,
        y,
        z: evaluator.eval(x, y, t),
    };

    for row in 0..GRID_CELLS {
        let y = min + row as f64 * step;
        for col in 0..GRID_CELLS {
            let x = min + col as f64 * step;
            out.push(at(x, y));
            out.push(at(x, y + step));
            out.push(at(x + step, y));
            out.push(at(x + step, y + step));
        }
    }
}

/// 顶点缓冲区对应的三角形下标
pub fn triangles(vertex_count: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..vertex_count / 4).flat_map(|cell| {
        let base = cell * 4;
        [[base, base + 1, base + 2], [base + 2, base + 1, base + 3]]
    })
}

impl SurfaceModel {
    /// 以当前设置在时间 `t` 处采样
    pub fn sample(&self, t: f64, out: &mut Vec<Vertex>) {
        sample(&self.evaluator(), self.min(), self.max(), t, out);
    }
}
