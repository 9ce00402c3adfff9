//! 经文分页

use super::SlideGroup;

/// 每页默认最多经节数
pub const DEFAULT_MAX_VERSES_PER_GROUP: usize = 2;

/// 每页默认最多换行数
pub const DEFAULT_MAX_LINES_PER_GROUP: usize = 4;

/// 经文分页限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassageLimits {
    pub max_verses: usize,
    pub max_lines: usize,
}

impl Default for PassageLimits {
    fn default() -> Self {
        Self {
            max_verses: DEFAULT_MAX_VERSES_PER_GROUP,
            max_lines: DEFAULT_MAX_LINES_PER_GROUP,
        }
    }
}

/// 经文分页
///
/// 依次累积经节，满足任一条件即结束当前页：
/// 1. 累积节数对 `max_verses` 取模回到 0
/// 2. 没有剩余经节
/// 3. 当前页文本的换行数达到 `max_lines`
///
/// 因此一节很长的经文可能在节数未满时就独占一页。
pub fn paginate_passage(verses: &[String], limits: PassageLimits) -> Vec<SlideGroup> {
    let max_verses = limits.max_verses.max(1);
    let mut groups = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut newlines = 0usize;
    let mut verse_count = 0usize;

    for (i, verse) in verses.iter().enumerate() {
        if !current.is_empty() {
            newlines += 1;
        }
        newlines += verse.matches('\n').count();
        current.push(verse.clone());

        verse_count = (verse_count + 1) % max_verses;
        let remaining = verses.len() - i - 1;

        if verse_count == 0 || remaining == 0 || newlines >= limits.max_lines {
            groups.push(SlideGroup::plain(std::mem::take(&mut current)));
            verse_count = 0;
            newlines = 0;
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verses(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn sizes(groups: &[SlideGroup]) -> Vec<usize> {
        groups.iter().map(SlideGroup::len).collect()
    }

    #[test]
    fn test_five_verses_two_per_group() {
        let v = verses(&["a", "b", "c", "d", "e"]);
        let groups = paginate_passage(&v, PassageLimits { max_verses: 2, max_lines: 4 });

        assert_eq!(sizes(&groups), vec![2, 2, 1]);
        assert_eq!(groups[0].body(), "a\nb");
        assert_eq!(groups[2].body(), "e");
    }

    #[test]
    fn test_long_single_verse_is_one_group() {
        let v = verses(&["l1\nl2\nl3\nl4\nl5\nl6"]);
        let groups = paginate_passage(&v, PassageLimits { max_verses: 2, max_lines: 4 });

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].units(), v.as_slice());
    }

    #[test]
    fn test_line_overflow_forces_early_boundary() {
        let v = verses(&["one\ntwo\nthree\nfour\nfive", "six", "seven"]);
        let groups = paginate_passage(&v, PassageLimits { max_verses: 3, max_lines: 4 });

        assert_eq!(sizes(&groups), vec![1, 2]);
    }

    #[test]
    fn test_joining_newline_counts_towards_limit() {
        let v = verses(&["a", "b", "c"]);
        let groups = paginate_passage(&v, PassageLimits { max_verses: 10, max_lines: 1 });

        assert_eq!(sizes(&groups), vec![2, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(paginate_passage(&[], PassageLimits::default()).is_empty());
    }

    #[test]
    fn test_zero_max_verses_treated_as_one() {
        let v = verses(&["a", "b"]);
        let groups = paginate_passage(&v, PassageLimits { max_verses: 0, max_lines: 4 });
        assert_eq!(sizes(&groups), vec![1, 1]);
    }
}
