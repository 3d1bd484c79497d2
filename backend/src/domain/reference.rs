//! Static reference data: command ranks and conduct rules.
//!
//! Both lists are seeded at bootstrap when storage holds none.

use serde::Serialize;

/// A command rank entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub id: i32,
    pub title: String,
    pub name: String,
    pub code: String,
    pub order: i32,
}

/// A conduct rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i32,
    pub content: String,
    pub category: String,
}

/// A rank waiting to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRank {
    pub title: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub order: i32,
}

/// A rule waiting to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRule {
    pub category: &'static str,
    pub content: &'static str,
}

/// Category assigned when a rule has none.
pub const DEFAULT_RULE_CATEGORY: &str = "general";

const fn rank(title: &'static str, name: &'static str, code: &'static str, order: i32) -> NewRank {
    NewRank {
        title,
        name,
        code,
        order,
    }
}

const fn rule(category: &'static str, content: &'static str) -> NewRule {
    NewRule { category, content }
}

/// Command structure seeded into an empty store.
pub const DEFAULT_RANKS: [NewRank; 9] = [
    rank("Police Chief", "Abdulrahman Alkhalid", "A-1", 1),
    rank("Deputy Police Chief", "Shibbeb haron", "A-2", 2),
    rank("General", "Abo Sultan", "P-3", 3),
    rank("General", "Demitri Smith", "P-2", 4),
    rank("General", "Faleh Al-Subaie", "P-1", 5),
    rank("General", "Ethen Dawosn", "P-0", 6),
    rank("Lieutenant", "JAX MURPHY", "C-7", 7),
    rank("Lieutenant", "Mark Murphy", "C-8", 8),
    rank("Lieutenant", "Alexander Falcone", "C-9", 9),
];

const GENERAL: &str = "قوانين عامة";
const FIREARMS: &str = "قوانين إطلاق النار";
const SUSPECTS: &str = "التعامل مع المجرمين";

/// Conduct rules seeded into an empty store.
pub const DEFAULT_RULES: [NewRule; 24] = [
    rule(GENERAL, "عدم التسلط على المواطنين والرتب الأقل منك والاحترام المتبادل واجب"),
    rule(GENERAL, "الجدية في العمل وعدم أخذ الوظيفة على محمل كوميدي وتقمص شخصية العسكري"),
    rule(GENERAL, "الالتزام بالملابس والمركبات والأسلحة الخاصة برتبتك"),
    rule(GENERAL, "يمنع التجارة أو بيع او إعطاء معدات الشرطة للمواطنين أو المسعفين"),
    rule(GENERAL, "يمنع استخدام سيارات المواطنين والمدنيين (اطلب وحدة نقل)"),
    rule(GENERAL, "عدم اظهار السلاح الناري او التيزر الا لسبب منطقي وفي الحالات القصوى"),
    rule(GENERAL, "لا يحق لك ارسال الشخص للسجن بدون وجود دليل مثبت على جريمته"),
    rule(GENERAL, "تفتيش الشخص وأخذ جميع الممنوعات الإجرامية ووضعها في الارشيف قبل السجن"),
    rule(GENERAL, "السلاح الأبيض لا يسحب الا في حال استخدامه في محاولة قتل"),
    rule(GENERAL, "استخدام الراديو للتبليغ فقط والالتزام بالبروتوكولات العسكرية"),
    rule(GENERAL, "ضرب التحية العسكرية إجباري ومن يرفض سيحاسب"),
    rule(GENERAL, "لا يسمح بتفتيش مواطن إلا في المركز أو حالات الاشتباه أو لبس قناع"),
    rule(FIREARMS, "يُمنع إطلاق النار بدون تحذير لفظي أو طلقة تحذيرية"),
    rule(FIREARMS, "إطلاق النار على الكفرات فقط في حالات الدهس المتعمد أو انتهاء زمن المطاردة"),
    rule(FIREARMS, "إطلاق النار على الشخص في حال مبادرة المجرمين بالإطلاق أو محاولة القتل"),
    rule(SUSPECTS, "لا يحق الكلبشة في المخالفات المرورية إلا في حال عدم التعاون"),
    rule(SUSPECTS, "ذكر التهمة للشخص والتأكد من سماعها كاملة"),
    rule(SUSPECTS, "ذكر جميع الحقوق (ميراندا) للمقبوض عليه"),
    rule(SUSPECTS, "تجهيز الأدلة قبل الوصول للمركز"),
    rule(SUSPECTS, "خصم 40% من المحكومية في حال الاعتراف بوجود محامي"),
    rule(SUSPECTS, "خصم 20% في حال الإقرار بالجريمة بشكل كامل وواضح"),
    rule("قوانين النطح", "النطح في حال الهرب بدون سلاح ومرور 30 ثانية مطاردة أقدام"),
    rule("قوانين التيزر", "استخدام التيزر في حال السلاح الأبيض أو التوجه لمركبة للهرب"),
    rule("قوانين الراديو", "يمنع المزح أو الألفاظ النابية أو مناقشة الأوامر في الراديو"),
];

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rank_orders_are_unique_and_ascending() {
        let orders: Vec<i32> = DEFAULT_RANKS.iter().map(|rank| rank.order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
        assert_eq!(orders.iter().collect::<HashSet<_>>().len(), orders.len());
    }

    #[test]
    fn rules_have_content_and_category() {
        assert!(
            DEFAULT_RULES
                .iter()
                .all(|rule| !rule.content.trim().is_empty() && !rule.category.is_empty())
        );
    }
}
