//! ICTCLAS part of speech tag set, as emitted by NLPIR with the default
//! `ict2` POS map.
//!
//! Codes nest by prefix: `nrf` lives under `nr`, which lives under `n`.

pub(super) struct Entry {
    pub code: &'static str,
    pub zh: &'static str,
    pub en: &'static str,
    pub children: &'static [Entry],
}

macro_rules! pos {
    ($code:literal, $zh:literal, $en:literal) => {
        Entry { code: $code, zh: $zh, en: $en, children: &[] }
    };
    ($code:literal, $zh:literal, $en:literal, [$($child:expr),* $(,)?]) => {
        Entry { code: $code, zh: $zh, en: $en, children: &[$($child),*] }
    };
}

pub(super) const ENTRIES: &[Entry] = &[
    pos!("n", "名词", "noun", [
        pos!("nr", "人名", "personal name", [
            pos!("nr1", "汉语姓氏", "Chinese surname"),
            pos!("nr2", "汉语名字", "Chinese given name"),
            pos!("nrj", "日语人名", "Japanese personal name"),
            pos!("nrf", "音译人名", "transcribed personal name"),
        ]),
        pos!("ns", "地名", "toponym", [
            pos!("nsf", "音译地名", "transcribed toponym"),
        ]),
        pos!("nt", "机构团体名", "organization/group name"),
        pos!("nz", "其它专名", "other proper noun"),
        pos!("nl", "名词性惯用语", "noun phrase"),
        pos!("ng", "名词性语素", "noun morpheme"),
    ]),
    pos!("t", "时间词", "time word", [
        pos!("tg", "时间词性语素", "time morpheme"),
    ]),
    pos!("s", "处所词", "locative word"),
    pos!("f", "方位词", "noun of locality"),
    pos!("v", "动词", "verb", [
        pos!("vd", "副动词", "auxiliary verb"),
        pos!("vn", "名动词", "noun-verb"),
        pos!("vshi", "动词\"是\"", "verb 是"),
        pos!("vyou", "动词\"有\"", "verb 有"),
        pos!("vf", "趋向动词", "directional verb"),
        pos!("vx", "行事动词", "performative verb"),
        pos!("vi", "不及物动词", "intransitive verb"),
        pos!("vl", "动词性惯用语", "verb phrase"),
        pos!("vg", "动词性语素", "verb morpheme"),
    ]),
    pos!("a", "形容词", "adjective", [
        pos!("ad", "副形词", "auxiliary adjective"),
        pos!("an", "名形词", "noun-adjective"),
        pos!("ag", "形容词性语素", "adjective morpheme"),
        pos!("al", "形容词性惯用语", "adjective phrase"),
    ]),
    pos!("b", "区别词", "distinguishing word", [
        pos!("bl", "区别词性惯用语", "distinguishing phrase"),
    ]),
    pos!("z", "状态词", "status word"),
    pos!("r", "代词", "pronoun", [
        pos!("rr", "人称代词", "personal pronoun"),
        pos!("rz", "指示代词", "demonstrative pronoun", [
            pos!("rzt", "时间指示代词", "temporal demonstrative pronoun"),
            pos!("rzs", "处所指示代词", "locative demonstrative pronoun"),
            pos!("rzv", "谓词性指示代词", "predicate demonstrative pronoun"),
        ]),
        pos!("ry", "疑问代词", "interrogative pronoun", [
            pos!("ryt", "时间疑问代词", "temporal interrogative pronoun"),
            pos!("rys", "处所疑问代词", "locative interrogative pronoun"),
            pos!("ryv", "谓词性疑问代词", "predicate interrogative pronoun"),
        ]),
        pos!("rg", "代词性语素", "pronoun morpheme"),
    ]),
    pos!("m", "数词", "numeral", [
        pos!("mq", "数量词", "numeral-plus-classifier compound"),
        pos!("mg", "干支", "zodiac"),
    ]),
    pos!("q", "量词", "classifier", [
        pos!("qv", "动量词", "verbal classifier"),
        pos!("qt", "时量词", "temporal classifier"),
    ]),
    pos!("d", "副词", "adverb"),
    pos!("p", "介词", "preposition", [
        pos!("pba", "介词“把”", "preposition 把"),
        pos!("pbei", "介词“被”", "preposition 被"),
    ]),
    pos!("c", "连词", "conjunction", [
        pos!("cc", "并列连词", "coordinating conjunction"),
    ]),
    pos!("u", "助词", "particle", [
        pos!("uzhe", "着", "particle 着"),
        pos!("ule", "了／喽", "particle 了/喽"),
        pos!("uguo", "过", "particle 过"),
        pos!("ude1", "的／底", "particle 的/底"),
        pos!("ude2", "地", "particle 地"),
        pos!("ude3", "得", "particle 得"),
        pos!("usuo", "所", "particle 所"),
        pos!("udeng", "等／等等／云云", "particle 等/等等/云云"),
        pos!("uyy", "一样／一般／似的／般", "particle 一样/一般/似的/般"),
        pos!("udh", "的话", "particle 的话"),
        pos!("uls", "来讲／来说／而言／说来", "particle 来讲/来说/而言/说来"),
        pos!("uzhi", "之", "particle 之"),
        pos!("ulian", "连", "particle 连"),
    ]),
    pos!("e", "叹词", "interjection"),
    pos!("y", "语气词", "modal particle"),
    pos!("o", "拟声词", "onomatopoeia"),
    pos!("h", "前缀", "prefix"),
    pos!("k", "后缀", "suffix"),
    pos!("x", "字符串", "string", [
        pos!("xe", "Email字符串", "email address"),
        pos!("xs", "微博会话分隔符", "hashtag"),
        pos!("xm", "表情符合", "emoticon"),
        pos!("xu", "网址URL", "URL"),
        pos!("xx", "非语素字", "non-morpheme character"),
    ]),
    pos!("w", "标点符号", "punctuation mark", [
        pos!("wkz", "左括号", "left parenthesis/bracket"),
        pos!("wky", "右括号", "right parenthesis/bracket"),
        pos!("wyz", "左引号", "left quotation mark"),
        pos!("wyy", "右引号", "right quotation mark"),
        pos!("wj", "句号", "period"),
        pos!("ww", "问号", "question mark"),
        pos!("wt", "叹号", "exclamation mark"),
        pos!("wd", "逗号", "comma"),
        pos!("wf", "分号", "semicolon"),
        pos!("wn", "顿号", "enumeration comma"),
        pos!("wm", "冒号", "colon"),
        pos!("ws", "省略号", "ellipsis"),
        pos!("wp", "破折号", "dash"),
        pos!("wb", "百分号千分号", "percent/per mille sign"),
        pos!("wh", "单位符号", "unit of measure sign"),
    ]),
];
