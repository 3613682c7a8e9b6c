use super::EntityMetadata;

/// Трейт для корня агрегата
///
/// Определяет обязательные методы и метаданные для всех агрегатов системы
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Получить бизнес-код записи (например, "RET-3F9A01BC")
    fn code(&self) -> &str;

    /// Получить описание/название записи
    fn description(&self) -> &str;

    /// Получить метаданные жизненного цикла
    fn metadata(&self) -> &EntityMetadata;

    /// Индекс агрегата в системе (например, "a003")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для БД (например, "return_case")
    fn collection_name() -> &'static str;

    /// Имя элемента для сообщений (единственное число)
    fn element_name() -> &'static str;

    /// Полное имя агрегата для системы (например, "a003_return_case")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
