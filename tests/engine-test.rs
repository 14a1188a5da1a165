use nlpir_rs::{Engine, FormatOptions, Granularity, Keyword, Nlpir, NlpirError, Result, TagNames};
use std::cell::RefCell;

/// Replays canned NLPIR output and records what it was asked.
struct StubEngine {
    segmented: String,
    key_words: String,
    calls: RefCell<Vec<String>>,
}

impl StubEngine {
    fn new(segmented: &str, key_words: &str) -> Self {
        StubEngine {
            segmented: segmented.to_string(),
            key_words: key_words.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Engine for StubEngine {
    fn paragraph_process(&self, text: &str, pos_tagging: bool) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(format!("paragraph_process({text:?}, {pos_tagging})"));
        if pos_tagging {
            Ok(self.segmented.clone())
        } else {
            Ok(self
                .segmented
                .split(' ')
                .map(|field| field.rsplit_once('/').map_or(field, |(word, _)| word))
                .collect::<Vec<_>>()
                .join(" "))
        }
    }

    fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(format!("get_key_words({text:?}, {max_words}, {weighted})"));
        if weighted {
            Ok(self.key_words.clone())
        } else {
            Ok(self
                .key_words
                .split('#')
                .filter(|entry| !entry.is_empty())
                .map(|entry| format!("{}#", entry.split('/').next().unwrap_or(entry)))
                .collect())
        }
    }
}

struct FailingEngine;

impl Engine for FailingEngine {
    fn paragraph_process(&self, _text: &str, _pos_tagging: bool) -> Result<String> {
        Err(NlpirError::Engine("NLPIR_ParagraphProcess returned a null pointer".into()))
    }

    fn get_key_words(&self, _text: &str, _max_words: usize, _weighted: bool) -> Result<String> {
        Err(NlpirError::Engine("NLPIR_GetKeyWords returned a null pointer".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub() -> StubEngine {
        StubEngine::new(
            "我们/rr 都/d 是/vshi 美国/nsf 人/n 。/wj",
            "美国/nsf/2.20/1#",
        )
    }

    #[test]
    fn segment_trims_input_test() {
        let nlpir = Nlpir::new(stub());
        let tokens = nlpir
            .segment("  我们都是美国人。\n", &FormatOptions::default())
            .unwrap();
        assert_eq!(tokens.len(), 6);
        assert_eq!(
            nlpir.engine().calls.borrow()[0],
            "paragraph_process(\"我们都是美国人。\", true)"
        );
    }

    #[test]
    fn segment_with_options_test() {
        let nlpir = Nlpir::new(stub());
        let options =
            FormatOptions::default().with_names(TagNames::Resolved(Granularity::Child));
        let tags: Vec<Option<String>> = nlpir
            .segment("我们都是美国人。", &options)
            .unwrap()
            .iter()
            .map(|token| token.tag_str())
            .collect();
        assert_eq!(tags[3].as_deref(), Some("transcribed toponym"));

        let surfaces: Vec<String> = nlpir
            .segment("我们都是美国人。", &FormatOptions::untagged())
            .unwrap()
            .into_iter()
            .map(|token| token.surface)
            .collect();
        assert_eq!(surfaces, vec!["我们", "都", "是", "美国", "人", "。"]);
    }

    #[test]
    fn key_words_test() {
        let nlpir = Nlpir::new(stub());
        assert_eq!(
            nlpir.get_key_words("我们都是美国人。", 50, true).unwrap(),
            vec![Keyword {
                word: "美国".to_string(),
                weight: Some(2.2)
            }]
        );
        assert_eq!(
            nlpir.get_key_words("我们都是美国人。", 50, false).unwrap(),
            vec![Keyword {
                word: "美国".to_string(),
                weight: None
            }]
        );
        assert_eq!(
            nlpir.engine().calls.borrow()[1],
            "get_key_words(\"我们都是美国人。\", 50, false)"
        );
    }

    #[test]
    fn engine_errors_propagate_test() {
        let nlpir = Nlpir::new(FailingEngine);
        assert!(matches!(
            nlpir.segment("我们", &FormatOptions::default()),
            Err(NlpirError::Engine(_))
        ));
        assert!(nlpir.get_key_words("我们", 5, true).is_err());
    }

    #[test]
    fn boxed_and_borrowed_engines_test() {
        let engine = stub();
        let borrowed = Nlpir::new(&engine);
        assert_eq!(borrowed.get_key_words("美国", 1, true).unwrap().len(), 1);

        let boxed: Nlpir<Box<dyn Engine>> = Nlpir::new(Box::new(stub()));
        assert_eq!(
            boxed.segment("美国人", &FormatOptions::default()).unwrap().len(),
            6
        );
        assert_eq!(engine.calls.borrow().len(), 1);
    }

    #[cfg(feature = "jieba")]
    #[test]
    fn jieba_engine_test() {
        use nlpir_rs::JiebaEngine;

        let nlpir = Nlpir::new(JiebaEngine::new());
        let tokens = nlpir
            .segment("这个句子有 空格。", &FormatOptions::default())
            .unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces.concat(), "这个句子有 空格。");
        assert!(surfaces.contains(&" "));
        let space = tokens.iter().find(|t| t.surface == " ").unwrap();
        assert_eq!(space.tag, None);
        let period = tokens.iter().find(|t| t.surface == "。").unwrap();
        assert_eq!(period.tag_str().as_deref(), Some("punctuation mark"));

        let keywords = nlpir
            .get_key_words("今天纽约的天气真好啊，京华大酒店的张尧经理吃了一只北京烤鸭。", 3, true)
            .unwrap();
        assert!(!keywords.is_empty() && keywords.len() <= 3);
        assert!(keywords.iter().all(|k| k.weight.is_some() && !k.word.is_empty()));
    }
}
