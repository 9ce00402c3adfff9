//! SlideGroup - 一页幻灯片的内容

use serde::Serialize;

/// 一页幻灯片承载的文本单元
///
/// `units` 是原始单元（歌词行或经文节），`body` 是最终渲染到幻灯片上的文本；
/// 双语模式下 `body` 中原文与译文交错，因此行数可能多于 `units`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideGroup {
    units: Vec<String>,
    body: String,
}

impl SlideGroup {
    pub(crate) fn new(units: Vec<String>, body: String) -> Self {
        Self { units, body }
    }

    /// 单语分组：body 为各单元按换行连接
    pub(crate) fn plain(units: Vec<String>) -> Self {
        let body = units.join("\n");
        Self { units, body }
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_body(self) -> String {
        self.body
    }
}
