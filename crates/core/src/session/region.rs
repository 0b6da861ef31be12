//! Platform id to server display name lookup.

/// Display name for a known platform id (case-insensitive).
pub fn server_name(code: &str) -> Option<&'static str> {
    let name = match code.to_ascii_uppercase().as_str() {
        "HN1" => "艾欧尼亚",
        "HN2" => "祖安",
        "HN3" => "诺克萨斯",
        "HN4" => "班德尔城",
        "HN5" => "皮尔特沃夫",
        "HN6" => "战争学院",
        "HN7" => "巨神峰",
        "HN8" => "雷瑟守备",
        "HN9" => "裁决之地",
        "HN10" => "黑色玫瑰",
        "HN11" => "暗影岛",
        "HN12" => "钢铁烈阳",
        "HN13" => "水晶之痕",
        "HN14" => "均衡教派",
        "HN15" => "影流",
        "HN16" => "守望之海",
        "HN17" => "征服之海",
        "HN18" => "卡拉曼达",
        "HN19" => "皮城警备",
        "WT1" => "比尔吉沃特",
        "WT2" => "德玛西亚",
        "WT3" => "弗雷尔卓德",
        "WT4" => "无畏先锋",
        "WT5" => "恕瑞玛",
        "WT6" => "扭曲丛林",
        "WT7" => "巨龙之巢",
        "EDU1" => "教育网专区",
        "BGP1" => "男爵领域",
        "BGP2" => "峡谷之巅",
        "TJ100" => "联盟一区",
        "TJ101" => "联盟二区",
        "NJ100" => "联盟三区",
        "GZ100" => "联盟四区",
        "CQ100" => "联盟五区",
        "NA1" => "北美",
        "EUW1" => "欧洲西部",
        "EUN1" => "欧洲北部与东部",
        "KR" => "韩国",
        "JP1" => "日本",
        "BR1" => "巴西",
        "LA1" => "拉丁美洲北部",
        "LA2" => "拉丁美洲南部",
        "OC1" => "大洋洲",
        "TR1" => "土耳其",
        "RU" => "俄罗斯",
        "TW2" => "台湾",
        "SG2" => "新加坡",
        "PH2" => "菲律宾",
        "TH2" => "泰国",
        "VN2" => "越南",
        "PBE1" => "测试服",
        _ => return None,
    };
    Some(name)
}

/// Display name for `code`, or the raw code when it is not in the table.
pub fn display_region(code: Option<&str>) -> String {
    match code {
        Some(code) => server_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string()),
        None => String::new(),
    }
}
