//! Scripture - 经文引用与版权
//!
//! 与经文来源无关的纯函数：引用规范化、生成式回复解析、版权声明表。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PARENTHESISED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthesis regex"));

static VERSE_NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s+").expect("valid verse number regex"));

/// 默认圣经译本
pub const DEFAULT_VERSION: &str = "NIV";

/// 已解析的经文段落
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub reference: String,
    pub version: String,
    pub verses: Vec<String>,
}

impl Passage {
    /// 幻灯片标题
    pub fn heading(&self) -> String {
        display_reference(&self.reference, &self.version)
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// `"John 3:16 (NIV)"`
pub fn display_reference(reference: &str, version: &str) -> String {
    format!("{} ({})", reference.trim(), version.trim())
}

/// 规范化经文引用
///
/// 去掉括号内容（如 `"(NIV)"`）、trim、每个单词首字母大写。
/// 空引用或 `"n"` 表示没有经文，返回 `None`。
pub fn normalize_reference(reference: &str) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n") {
        return None;
    }

    let stripped = PARENTHESISED.replace_all(trimmed, "");
    let normalized = title_case(stripped.trim());
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// 字母紧跟在非字母之后时大写，其余小写
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// 解析生成式模型返回的经文
///
/// 期望每节一行、以节号开头。不以节号开头的行并入上一节；
/// 节号本身被去掉。
pub fn parse_numbered_verses(text: &str) -> Vec<String> {
    let mut verses: Vec<String> = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if VERSE_NUMBER_PREFIX.is_match(line) || verses.is_empty() {
            verses.push(line.to_string());
        } else if let Some(last) = verses.last_mut() {
            last.push('\n');
            last.push_str(line);
        }
    }

    verses
        .into_iter()
        .map(|v| VERSE_NUMBER_PREFIX.replace(&v, "").trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// 各译本版权声明；未收录的译本视为公有领域
pub fn copyright_notice(version: &str) -> &'static str {
    match version.trim().to_uppercase().as_str() {
        "NIV" => {
            "Scripture quotations taken from The Holy Bible, New International Version® NIV®\n\
             Copyright © 1973, 1978, 1984, 2011 by Biblica, Inc.\n\
             Used with permission. All rights reserved worldwide."
        }
        "ESV" => {
            "Scripture quotations are from The ESV® Bible (The Holy Bible, English Standard Version®), \
             © 2001 by Crossway, a publishing ministry of Good News Publishers. \
             Used by permission. All rights reserved."
        }
        "NLT" => {
            "Scripture quotations are taken from the Holy Bible, New Living Translation, \
             Copyright © 1996, 2004, 2015 by Tyndale House Foundation. \
             Used by permission of Tyndale House Publishers, Inc., Carol Stream, Illinois 60188. \
             All rights reserved."
        }
        "CEV" => {
            "Scripture quotations marked (CEV) are from the Contemporary English Version \
             Copyright © 1991, 1992, 1995 by American Bible Society. Used by Permission."
        }
        "NASB" => {
            "Scripture quotations taken from the (NASB®) New American Standard Bible®, \
             Copyright © 1960, 1971, 1977, 1995, 2020 by The Lockman Foundation. \
             Used by permission. All rights reserved. lockman.org"
        }
        "NKJV" => {
            "Scripture taken from the New King James Version®. Copyright © 1982 by Thomas Nelson. \
             Used by permission. All rights reserved."
        }
        _ => "Public domain",
    }
}
