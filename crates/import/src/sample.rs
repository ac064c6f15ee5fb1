use finassist_core::Transaction;

/// A fixed demonstration data set covering both directions and most
/// categories. Usable in place of an imported file.
pub fn sample_transactions() -> Vec<Transaction> {
    [
        ("2024-01-15", -1500.50, "Продукты в Пятерочке"),
        ("2024-01-10", 50000.00, "Зарплата за январь"),
        ("2024-01-12", -350.00, "Такси Яндекс"),
        ("2024-01-08", -1200.00, "Ресторан Суши Wok"),
        ("2024-01-20", 5000.00, "Премия за проект"),
        ("2024-01-05", -450.00, "Аптека №1"),
        ("2024-01-18", -2200.00, "Магнит косметик"),
        ("2024-01-25", -750.00, "Кинотеатр Формула Кино"),
    ]
    .into_iter()
    .map(|(date, amount, description)| Transaction::new(date, amount, description))
    .collect()
}
