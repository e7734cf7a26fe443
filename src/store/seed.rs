use crate::core::Task;

/// Example tasks written to an empty or unreadable store
pub(crate) fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            product: "Produtos de Limpeza".to_string(),
            brand: "Ypê".to_string(),
            quantity: 150.0,
            peso: None,
            value: 2750.00,
            date: "2024-01-15".to_string(),
            expiry_date: Some("2025-01-15".to_string()),
            description: "Reposição de produtos de limpeza no corredor 3".to_string(),
            duration: 52.0,
            created_at: "2024-01-15T10:30:00Z".to_string(),
        },
        Task {
            id: "2".to_string(),
            product: "Conservas".to_string(),
            brand: "Unilever".to_string(),
            quantity: 85.0,
            peso: None,
            value: 1850.50,
            date: "2024-01-14".to_string(),
            expiry_date: Some("2024-12-14".to_string()),
            description: "Reposição de produtos alimentícios no setor de conservas".to_string(),
            duration: 103.0,
            created_at: "2024-01-14T14:20:00Z".to_string(),
        },
        Task {
            id: "3".to_string(),
            product: "Bebidas".to_string(),
            brand: "BH".to_string(),
            quantity: 200.0,
            peso: None,
            value: 4200.75,
            date: "2024-01-13".to_string(),
            expiry_date: Some("2024-11-13".to_string()),
            description: "Reposição de bebidas e refrigerantes no corredor 1".to_string(),
            duration: 65.0,
            created_at: "2024-01-13T09:15:00Z".to_string(),
        },
    ]
}
