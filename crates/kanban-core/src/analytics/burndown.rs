//! Burndown - シミュレーションのバーンダウン系列
//!
//! 日次のスナップショットは保存していないので、これは履歴ではない。
//! 最初の 3 点は total に固定比率を掛けた値、最後の 1 点は現在の remaining。

use serde::{Deserialize, Serialize};

/// day 1..=3 で total に掛ける比率
pub const DECAY_RATIOS: [f64; 3] = [1.0, 0.9, 0.8];

/// BurndownPoint はバーンダウンチャートの 1 点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurndownPoint {
    pub day: u32,
    pub remaining: f64,
}

/// `[total, total*0.9, total*0.8, remaining]` の 4 点を作る
pub fn simulated_burndown(total: f64, remaining: f64) -> Vec<BurndownPoint> {
    let mut points: Vec<BurndownPoint> = DECAY_RATIOS
        .iter()
        .zip(1..)
        .map(|(ratio, day)| BurndownPoint {
            day,
            remaining: total * ratio,
        })
        .collect();
    points.push(BurndownPoint {
        day: DECAY_RATIOS.len() as u32 + 1,
        remaining,
    });
    points
}
