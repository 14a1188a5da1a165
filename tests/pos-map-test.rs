use nlpir_rs::{get_pos_name, get_pos_name_str, Granularity, NlpirError, PosMap, PosName, ICTPOS};

#[cfg(test)]
mod tests {
    use super::*;

    const GRANULARITIES: [Granularity; 3] =
        [Granularity::Parent, Granularity::Child, Granularity::All];

    fn name(s: &str) -> Option<PosName> {
        Some(PosName::Name(s.to_string()))
    }

    fn path(names: &[&str]) -> Option<PosName> {
        Some(PosName::Path(names.iter().map(|s| s.to_string()).collect()))
    }

    fn collect_codes(pos_map: &PosMap, out: &mut Vec<String>) {
        for (code, node) in pos_map.iter() {
            out.push(code.to_string());
            collect_codes(&node.children, out);
        }
    }

    #[test]
    fn full_path_test() {
        assert_eq!(
            get_pos_name("nrf", Granularity::All, true, &ICTPOS),
            path(&["noun", "personal name", "transcribed personal name"])
        );
        assert_eq!(
            get_pos_name("nsf", Granularity::All, false, &ICTPOS),
            path(&["名词", "地名", "音译地名"])
        );
    }

    #[test]
    fn most_specific_chinese_test() {
        assert_eq!(
            get_pos_name("nrf", Granularity::Child, false, &ICTPOS),
            name("音译人名")
        );
    }

    #[test]
    fn parent_and_child_match_path_ends_test() {
        let mut codes = Vec::new();
        collect_codes(&ICTPOS, &mut codes);
        assert_eq!(codes.len(), 98);

        for code in &codes {
            for english in [true, false] {
                let full = get_pos_name(code, Granularity::All, english, &ICTPOS)
                    .and_then(|name| name.as_path().map(|p| p.to_vec()))
                    .unwrap_or_else(|| panic!("'{code}' should resolve"));
                assert_eq!(
                    get_pos_name(code, Granularity::Parent, english, &ICTPOS),
                    name(&full[0])
                );
                assert_eq!(
                    get_pos_name(code, Granularity::Child, english, &ICTPOS),
                    name(&full[full.len() - 1])
                );
            }
        }
    }

    #[test]
    fn case_insensitive_test() {
        for granularity in GRANULARITIES {
            assert_eq!(
                get_pos_name("N", granularity, true, &ICTPOS),
                get_pos_name("n", granularity, true, &ICTPOS)
            );
            assert_eq!(
                get_pos_name("NSF", granularity, false, &ICTPOS),
                get_pos_name("nsf", granularity, false, &ICTPOS)
            );
        }
        // NLPIR emits 'Rg' and 'Mg' with a capital letter.
        assert_eq!(get_pos_name("Rg", Granularity::Parent, true, &ICTPOS), name("pronoun"));
        assert_eq!(
            get_pos_name("Mg", Granularity::All, true, &ICTPOS),
            path(&["numeral", "zodiac"])
        );
    }

    #[test]
    fn unrecognized_code_test() {
        for granularity in GRANULARITIES {
            assert_eq!(get_pos_name("gms", granularity, true, &ICTPOS), None);
            assert_eq!(get_pos_name("gms", granularity, false, &ICTPOS), None);
            assert_eq!(get_pos_name("jx", granularity, true, &ICTPOS), None);
        }
    }

    #[test]
    fn dead_end_child_test() {
        for code in ["nx", "nrx", "NRX"] {
            assert_eq!(get_pos_name(code, Granularity::Child, true, &ICTPOS), None);
            assert_eq!(get_pos_name(code, Granularity::Child, false, &ICTPOS), None);
            assert_eq!(get_pos_name(code, Granularity::Parent, true, &ICTPOS), name("noun"));
        }
        assert_eq!(get_pos_name("nx", Granularity::All, true, &ICTPOS), path(&["noun"]));
        assert_eq!(
            get_pos_name("nrx", Granularity::All, true, &ICTPOS),
            path(&["noun", "personal name"])
        );
        assert_eq!(get_pos_name_str("nrx", "child", true, &ICTPOS).unwrap(), None);
    }

    #[test]
    fn string_granularity_test() {
        assert_eq!(
            get_pos_name_str("xx", "parent", true, &ICTPOS).unwrap(),
            name("string")
        );
        assert_eq!(
            get_pos_name_str("xx", "most-specific", true, &ICTPOS).unwrap(),
            name("non-morpheme character")
        );
        assert_eq!(get_pos_name_str("gms", "ALL", true, &ICTPOS).unwrap(), None);
    }

    #[test]
    fn bogus_granularity_test() {
        let err = get_pos_name_str("n", "bogus-granularity", true, &ICTPOS).unwrap_err();
        assert!(matches!(err, NlpirError::InvalidArgument(_)));
        // Rejected even when the code would not resolve.
        assert!(get_pos_name_str("gms", "bogus-granularity", true, &ICTPOS).is_err());
    }

    #[test]
    fn custom_map_from_json_test() {
        let json = r#"{
            "n": {"zh": "名词", "en": "noun", "children": {
                "nx": {"zh": "字母专名", "en": "letter name"}
            }},
            "v": {"zh": "动词", "en": "verb"}
        }"#;
        let pos_map = PosMap::from_json(json).unwrap();
        assert_eq!(pos_map.len(), 2);
        assert_eq!(
            get_pos_name("nx", Granularity::All, true, &pos_map),
            path(&["noun", "letter name"])
        );
        // 'nsf' reaches 'n' but no child of it in this map.
        assert_eq!(get_pos_name("nsf", Granularity::Parent, true, &pos_map), name("noun"));
        assert_eq!(get_pos_name("nsf", Granularity::Child, true, &pos_map), None);
        assert_eq!(
            get_pos_name("nsf", Granularity::All, true, &pos_map),
            path(&["noun"])
        );

        let again = PosMap::from_json(&pos_map.to_json().unwrap()).unwrap();
        assert_eq!(again, pos_map);
    }

    #[test]
    fn invalid_custom_map_test() {
        let child_not_extending = r#"{"n": {"zh": "名词", "en": "noun", "children": {
            "v": {"zh": "动词", "en": "verb"}}}}"#;
        let sibling_prefix = r#"{
            "g": {"zh": "学术词汇", "en": "academic term"},
            "gr": {"zh": "宗教词汇", "en": "religious term"}}"#;
        let uppercase = r#"{"N": {"zh": "名词", "en": "noun"}}"#;
        let empty_name = r#"{"n": {"zh": "", "en": "noun"}}"#;

        for json in [child_not_extending, sibling_prefix, uppercase, empty_name] {
            assert!(matches!(
                PosMap::from_json(json),
                Err(NlpirError::Taxonomy(_))
            ));
        }
        assert!(matches!(PosMap::from_json("[1, 2]"), Err(NlpirError::Json(_))));
    }
}
