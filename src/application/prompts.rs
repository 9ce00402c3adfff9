//! 生成式服务的 prompt 模板与回复清洗

const SONG_TRANSLATOR: &str = r#"You are a song translator. Translate the song below line by line into {language}.

Keep the number of syllables on each {language} line close to the number of syllables in the matching English line, because the song will be sung in church.

Return exactly {count} lines, one translated line per input line, in the same order.
Do not repeat the English lines. Do not number the lines. Do not add any other output.

{text}"#;

const PHRASE_TRANSLATOR: &str = r#"Translate the following text into {language}. Return only the translation.

{text}"#;

const SCRIPTURE_LOOKUP: &str = "Return the text of the bible passage {reference} ({version}). \
Format the output so each verse is on a new line starting with its verse number. \
Do not include the reference title or any introductory text. If not found, return nothing.";

const SECTION_STRUCTURE: &str = r#"Split the following {kind} into its logical sections (for example Verse 1, Chorus, Bridge).

Return ONLY a JSON array of objects with the fields "label" and "content".
"content" keeps the original lines separated by newlines. Do not change, translate or drop any line.

{text}"#;

/// 多行歌词翻译 prompt（要求逐行对齐）
pub fn song_translation(lines: &[String], language: &str) -> String {
    SONG_TRANSLATOR
        .replace("{language}", language)
        .replace("{count}", &lines.len().to_string())
        .replace("{text}", &lines.join("\n"))
}

/// 单条文本翻译 prompt
pub fn phrase_translation(text: &str, language: &str) -> String {
    PHRASE_TRANSLATOR
        .replace("{language}", language)
        .replace("{text}", text)
}

/// 经文检索兜底 prompt
pub fn scripture_lookup(reference: &str, version: &str) -> String {
    SCRIPTURE_LOOKUP
        .replace("{reference}", reference)
        .replace("{version}", version)
}

/// 段落结构兜底 prompt
pub fn section_structure(text: &str, kind: &str) -> String {
    SECTION_STRUCTURE
        .replace("{kind}", kind)
        .replace("{text}", text)
}

/// 去掉 markdown 代码块围栏（```json ... ```）
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // 多行时跳过语言标记所在的第一行，单行围栏直接取内容
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// 把翻译回复拆成行
///
/// 丢弃空行；若回复恰好是请求行数的两倍且偶数行都是原文（原文/译文交替），
/// 只保留译文行。
pub fn translation_lines(reply: &str, sources: &[String]) -> Vec<String> {
    let lines: Vec<String> = strip_code_fences(reply)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    let alternating = !sources.is_empty()
        && lines.len() == sources.len() * 2
        && lines
            .iter()
            .step_by(2)
            .zip(sources)
            .all(|(line, source)| line == source.trim());

    if alternating {
        lines.into_iter().skip(1).step_by(2).collect()
    } else {
        lines
    }
}
