use std::collections::HashMap;

use crate::models::*;

const PART_PRON: &str = "平假名";
const PART_ROMAJI: &str = "罗马音";
const EXCHANGE_SYNONYMS: &str = "同义词";
const EXCHANGE_ANTONYMS: &str = "反义词";
const EXCHANGE_BASE_FORM: &str = "原形";
const ADDITION_TAGS: &str = "标签";

// 空字符串与缺失同样处理
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn dot_separated(text: &str) -> String {
    text.replace('#', "·")
}

/// 释义摘要，作为宿主的段落结果
pub fn excerpt_paragraph(entry: &WordEntry) -> String {
    entry.word.excerpt.as_deref().map(dot_separated).unwrap_or_default()
}

/// 将单词详情转换为宿主词典结构
pub fn build_dictionary(data: &WordDetailData, entry: &WordEntry) -> DictionaryResult {
    let word = &entry.word;

    DictionaryResult {
        word: format!("{} {}", word.spell, word.accent.as_deref().unwrap_or("")),
        parts: build_parts(word),
        exchanges: build_exchanges(data),
        additions: build_additions(entry),
    }
}

fn build_parts(word: &Word) -> Vec<Part> {
    let mut parts = Vec::new();

    if let Some(pron) = present(&word.pron) {
        parts.push(Part {
            part: PART_PRON.to_string(),
            means: vec![format!("[{}]", pron)],
        });
    }
    if let Some(romaji) = present(&word.romaji) {
        parts.push(Part {
            part: PART_ROMAJI.to_string(),
            means: vec![format!("[{}]", romaji)],
        });
    }

    parts
}

fn build_exchanges(data: &WordDetailData) -> Vec<Exchange> {
    let mut exchanges = Vec::new();

    if let Some(thesaurus) = &data.thesaurus {
        if !thesaurus.synonyms.is_empty() {
            exchanges.push(Exchange {
                name: EXCHANGE_SYNONYMS.to_string(),
                words: thesaurus.synonyms.clone(),
            });
        }
        if !thesaurus.antonyms.is_empty() {
            exchanges.push(Exchange {
                name: EXCHANGE_ANTONYMS.to_string(),
                words: thesaurus.antonyms.clone(),
            });
        }
    }

    exchanges.push(Exchange {
        name: EXCHANGE_BASE_FORM.to_string(),
        words: vec![data.conjugate.type_label.clone()],
    });

    // 各组活用形按原顺序展开，每个活用形单独一项
    exchanges.extend(data.conjugate.forms.iter().flatten().map(|form| Exchange {
        name: form.name.clone(),
        words: vec![form.form.clone()],
    }));

    exchanges
}

fn build_additions(entry: &WordEntry) -> Vec<Addition> {
    // 同一个 id 出现多次时后者覆盖前者，缺少关联 id 的记录不参与关联
    let subdetails: HashMap<&str, &Subdetail> = entry
        .subdetails
        .iter()
        .filter_map(|subdetail| Some((subdetail.details_id.as_deref()?, subdetail)))
        .collect();
    let examples: HashMap<&str, &Example> = entry
        .examples
        .iter()
        .filter_map(|example| Some((example.subdetails_id.as_deref()?, example)))
        .collect();

    let mut additions = Vec::new();
    let mut definition_index = 1;

    for detail in &entry.details {
        let Some(subdetail) = detail
            .object_id
            .as_deref()
            .and_then(|id| subdetails.get(id))
        else {
            continue;
        };

        additions.push(Addition {
            name: String::new(),
            value: format!(
                "{}、[{}] {}",
                definition_index,
                dot_separated(&detail.title),
                subdetail.title
            ),
        });
        definition_index += 1;

        if let Some(example) = subdetail
            .object_id
            .as_deref()
            .and_then(|id| examples.get(id))
        {
            additions.push(Addition {
                name: example.title.clone(),
                value: example.trans.clone().unwrap_or_default(),
            });
        }
    }

    if let Some(tags) = present(&entry.word.tags) {
        additions.push(Addition {
            name: ADDITION_TAGS.to_string(),
            value: tags.split('#').collect::<Vec<_>>().join(" / "),
        });
    }

    additions
}
