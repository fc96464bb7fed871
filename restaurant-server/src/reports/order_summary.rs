//! 订单明细聚合
//!
//! 四个阶段:
//!
//! 1. **match** - 按 `order_id` 取出订单明细
//! 2. **lookup** - 批量查出明细引用的菜品、订单，以及订单引用的桌台
//! 3. **project** - 每条明细展平为 [`OrderItemLine`]
//! 4. **group** - 按 (order_id, table_id, table_number) 分组，累计应付金额和数量
//!
//! 查不到的菜品或桌台只会让对应字段为空，不会报错。
//! `project` 和 `group` 是纯函数，不访问数据库。

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Food, Order, OrderItem, Table};
use crate::db::repository::{
    FoodRepository, OrderItemRepository, OrderRepository, RepoResult, TableRepository,
};
use crate::money::sum_prices;

/// 展平后的单条明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemLine {
    /// 菜品价格 (菜品缺失时为 null)
    pub amount: Option<f64>,
    pub price: Option<f64>,
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub table_number: Option<i32>,
    pub table_id: Option<String>,
    pub order_id: String,
    pub quantity: i32,
}

/// 一个分组的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub table_id: Option<String>,
    pub table_number: Option<i32>,
    /// 组内 `amount` 之和，空值忽略
    pub payment_due: f64,
    pub total_count: usize,
    pub order_items: Vec<OrderItemLine>,
}

/// 聚合查询入口
#[derive(Clone)]
pub struct OrderSummaryReport {
    items: OrderItemRepository,
    foods: FoodRepository,
    orders: OrderRepository,
    tables: TableRepository,
}

impl OrderSummaryReport {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            items: OrderItemRepository::new(db.clone()),
            foods: FoodRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            tables: TableRepository::new(db),
        }
    }

    /// 汇总一个订单；订单不存在或没有明细时返回空列表
    pub async fn run(&self, order_id: &str) -> RepoResult<Vec<OrderSummary>> {
        // match
        let items = self.items.find_by_order(order_id).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        // lookup
        let food_ids = distinct(items.iter().map(|i| i.food_id.clone()));
        let order_ids = distinct(items.iter().map(|i| i.order_id.clone()));
        let foods = index_by(self.foods.find_by_ids(&food_ids).await?, |f| f.food_id.clone());
        let orders = index_by(self.orders.find_by_ids(&order_ids).await?, |o| o.order_id.clone());
        let table_ids = distinct(orders.values().filter_map(|o| o.table_id.clone()));
        let tables = index_by(self.tables.find_by_ids(&table_ids).await?, |t| t.table_id.clone());

        let lines = project(&items, &foods, &orders, &tables);
        let summaries = group(lines);

        tracing::debug!(
            order_id = %order_id,
            items = items.len(),
            groups = summaries.len(),
            "Order summary aggregated"
        );
        Ok(summaries)
    }
}

/// 展平每条明细
pub fn project(
    items: &[OrderItem],
    foods: &HashMap<String, Food>,
    orders: &HashMap<String, Order>,
    tables: &HashMap<String, Table>,
) -> Vec<OrderItemLine> {
    items
        .iter()
        .map(|item| {
            let food = foods.get(&item.food_id);
            // table_id 取自查到的桌台记录，桌台缺失时为空
            let table = orders
                .get(&item.order_id)
                .and_then(|o| o.table_id.as_ref())
                .and_then(|id| tables.get(id));

            OrderItemLine {
                amount: food.map(|f| f.price),
                price: food.map(|f| f.price),
                food_name: food.map(|f| f.name.clone()),
                food_image: food.map(|f| f.food_image.clone()),
                table_number: table.map(|t| t.table_number),
                table_id: table.map(|t| t.table_id.clone()),
                order_id: item.order_id.clone(),
                quantity: item.quantity,
            }
        })
        .collect()
}

/// 按 (order_id, table_id, table_number) 分组，组的顺序为首次出现的顺序
pub fn group(lines: Vec<OrderItemLine>) -> Vec<OrderSummary> {
    type GroupKey = (String, Option<String>, Option<i32>);

    let mut positions: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<OrderItemLine>)> = Vec::new();

    for line in lines {
        let key = (line.order_id.clone(), line.table_id.clone(), line.table_number);
        match positions.get(&key) {
            Some(&idx) => groups[idx].1.push(line),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![line]));
            }
        }
    }

    groups
        .into_iter()
        .map(|((order_id, table_id, table_number), order_items)| OrderSummary {
            payment_due: sum_prices(order_items.iter().filter_map(|l| l.amount)),
            total_count: order_items.len(),
            order_id,
            table_id,
            table_number,
            order_items,
        })
        .collect()
}

fn distinct(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(id.clone())).collect()
}

fn index_by<T>(docs: Vec<T>, key: impl Fn(&T) -> String) -> HashMap<String, T> {
    docs.into_iter().map(|d| (key(&d), d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(order_id: &str, food_id: &str, quantity: i32) -> OrderItem {
        OrderItem {
            order_item_id: format!("{order_id}-{food_id}"),
            order_id: order_id.into(),
            food_id: food_id.into(),
            quantity,
            unit_price: 1.0,
            ..Default::default()
        }
    }

    fn food(id: &str, price: f64) -> (String, Food) {
        (
            id.to_string(),
            Food {
                food_id: id.into(),
                name: format!("food {id}"),
                price,
                food_image: format!("{id}.png"),
                ..Default::default()
            },
        )
    }

    fn order(id: &str, table_id: Option<&str>) -> (String, Order) {
        (
            id.to_string(),
            Order {
                order_id: id.into(),
                table_id: table_id.map(String::from),
                ..Default::default()
            },
        )
    }

    fn table(id: &str, number: i32) -> (String, Table) {
        (
            id.to_string(),
            Table {
                table_id: id.into(),
                table_number: number,
                number_of_guests: 2,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_single_order_totals() {
        let items = vec![item("o1", "f1", 2), item("o1", "f2", 1), item("o1", "f1", 3)];
        let foods = HashMap::from([food("f1", 10.1), food("f2", 0.2)]);
        let orders = HashMap::from([order("o1", Some("t1"))]);
        let tables = HashMap::from([table("t1", 7)]);

        let summaries = group(project(&items, &foods, &orders, &tables));
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.payment_due, 20.4);
        assert_eq!(summary.table_number, Some(7));
        assert_eq!(summary.table_id.as_deref(), Some("t1"));
        assert_eq!(summary.order_items[0].food_name.as_deref(), Some("food f1"));
        assert_eq!(summary.order_items[2].quantity, 3);
    }

    #[test]
    fn test_missing_food_and_table_yield_nulls() {
        let items = vec![item("o1", "gone", 1), item("o1", "f1", 1)];
        let foods = HashMap::from([food("f1", 5.0)]);
        let orders = HashMap::from([order("o1", Some("missing-table"))]);

        let lines = project(&items, &foods, &orders, &HashMap::new());
        assert_eq!(lines[0].amount, None);
        assert_eq!(lines[0].food_name, None);
        assert_eq!(lines[0].table_id, None);
        assert_eq!(lines[0].table_number, None);

        let summaries = group(lines);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].table_id, None);
        // null amounts are skipped
        assert_eq!(summaries[0].payment_due, 5.0);
        assert_eq!(summaries[0].total_count, 2);
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let lines = project(
            &[item("b", "f1", 1), item("a", "f1", 1), item("b", "f1", 1)],
            &HashMap::from([food("f1", 1.5)]),
            &HashMap::from([order("a", None), order("b", None)]),
            &HashMap::new(),
        );
        let summaries = group(lines);
        let ids: Vec<&str> = summaries.iter().map(|s| s.order_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(summaries[0].total_count, 2);
        assert_eq!(summaries[0].payment_due, 3.0);
        assert_eq!(summaries[1].table_number, None);
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        assert!(group(Vec::new()).is_empty());
    }

    #[test]
    fn test_distinct_preserves_order() {
        let ids = distinct(["b", "a", "b"].into_iter().map(String::from));
        assert_eq!(ids, vec!["b", "a"]);
    }
}
